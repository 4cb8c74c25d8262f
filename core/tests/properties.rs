//! Property tests driven through the public API: every graph is written to
//! a real temp file and loaded by the production loader.

use std::collections::HashSet;
use std::io::Write;

use proptest::prelude::*;

use edgegraph_core::{bfs, dfs, induced_edges, load, statistics, CsrGraph, NodeId};

fn edge_lists() -> impl Strategy<Value = Vec<(NodeId, NodeId)>> {
    prop::collection::vec((0u64..40, 0u64..40), 1..200)
}

fn load_edges(edges: &[(NodeId, NodeId)]) -> CsrGraph {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for &(src, tgt) in edges {
        writeln!(file, "{src} {tgt}").unwrap();
    }
    file.flush().unwrap();
    load(file.path()).unwrap().0
}

fn distinct_ids(edges: &[(NodeId, NodeId)]) -> HashSet<NodeId> {
    edges.iter().flat_map(|&(s, t)| [s, t]).collect()
}

/// Reference reachability: fixpoint over the raw edge list.
fn reachable_from(edges: &[(NodeId, NodeId)], start: NodeId) -> HashSet<NodeId> {
    let mut reached = HashSet::from([start]);
    loop {
        let before = reached.len();
        for &(src, tgt) in edges {
            if reached.contains(&src) {
                reached.insert(tgt);
            }
        }
        if reached.len() == before {
            return reached;
        }
    }
}

proptest! {
    #[test]
    fn degree_round_trip(edges in edge_lists()) {
        let graph = load_edges(&edges);
        prop_assert_eq!(graph.edge_count(), edges.len());
        prop_assert_eq!(graph.node_count(), distinct_ids(&edges).len());

        for id in distinct_ids(&edges) {
            let expected = edges.iter().filter(|&&(src, _)| src == id).count();
            prop_assert_eq!(graph.out_degree(id).unwrap(), expected);
        }
    }

    #[test]
    fn neighbor_blocks_partition_the_edge_list(edges in edge_lists()) {
        let graph = load_edges(&edges);
        let mut total = 0;
        for id in distinct_ids(&edges) {
            let neighbors = graph.neighbors(id).unwrap();
            prop_assert_eq!(neighbors.len(), graph.out_degree(id).unwrap());
            // Block content matches the file's edges for this source, in order.
            let expected: Vec<NodeId> = edges
                .iter()
                .filter(|&&(src, _)| src == id)
                .map(|&(_, tgt)| tgt)
                .collect();
            prop_assert_eq!(neighbors, expected);
            total += graph.out_degree(id).unwrap();
        }
        prop_assert_eq!(total, graph.edge_count());
    }

    #[test]
    fn bfs_is_depth_monotone(edges in edge_lists(), depth in 0u32..8) {
        let graph = load_edges(&edges);
        let start = edges[0].0;
        let shallow = bfs(&graph, start, depth).unwrap();
        let deep = bfs(&graph, start, depth + 1).unwrap();
        prop_assert_eq!(&deep[..shallow.len()], &shallow[..]);
    }

    #[test]
    fn bfs_has_no_duplicates(edges in edge_lists(), depth in 0u32..8) {
        let graph = load_edges(&edges);
        let result = bfs(&graph, edges[0].0, depth).unwrap();
        let unique: HashSet<NodeId> = result.iter().copied().collect();
        prop_assert_eq!(unique.len(), result.len());
    }

    #[test]
    fn dfs_visits_exactly_the_reachable_set(edges in edge_lists()) {
        let graph = load_edges(&edges);
        let start = edges[0].0;
        let result = dfs(&graph, start).unwrap();
        let unique: HashSet<NodeId> = result.iter().copied().collect();
        prop_assert_eq!(unique.len(), result.len());
        prop_assert_eq!(unique, reachable_from(&edges, start));
    }

    #[test]
    fn induced_edges_over_all_nodes_reproduces_the_file(edges in edge_lists()) {
        let graph = load_edges(&edges);
        // Pass every node in a fixed order; per source, emission must follow
        // file order, including duplicates.
        let mut nodes: Vec<NodeId> = distinct_ids(&edges).into_iter().collect();
        nodes.sort_unstable();

        let mut expected = Vec::new();
        for &id in &nodes {
            for &(src, tgt) in &edges {
                if src == id {
                    expected.push((src, tgt));
                }
            }
        }
        prop_assert_eq!(induced_edges(&graph, &nodes), expected);
    }

    #[test]
    fn statistics_matches_maximum_degree(edges in edge_lists()) {
        let graph = load_edges(&edges);
        let stats = statistics(&graph);
        let max = distinct_ids(&edges)
            .into_iter()
            .map(|id| graph.out_degree(id).unwrap())
            .max()
            .unwrap_or(0);
        prop_assert_eq!(stats.max_out_degree, max);
        let argmax = stats.argmax_node.unwrap();
        prop_assert_eq!(graph.out_degree(argmax).unwrap(), max);
    }
}

//! Stateless queries against a [`CsrGraph`].
//!
//! Every operation borrows the store read-only and allocates its own
//! visited/frontier buffers sized to `node_count()`, so identical queries
//! may run concurrently against one graph.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::Result;
use crate::graph::{CsrGraph, DenseId, NodeId};

/// Summary counters for a loaded graph.
#[derive(Debug, Clone)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub max_out_degree: usize,
    /// Raw id of the highest-out-degree node; ties go to the node seen
    /// first during load. `None` for an empty graph.
    pub argmax_node: Option<NodeId>,
    pub memory_footprint_bytes: usize,
    pub load_time: Duration,
}

/// Bounded breadth-first traversal over outgoing edges.
///
/// The start node is the first element, followed by every node first
/// reached within `max_depth` hops in level-then-discovery order: within a
/// level, order follows the expanding parent's position in the previous
/// frontier and then edge order inside that parent's block. Each node
/// appears at most once. `max_depth == 0` yields only the start node.
pub fn bfs(graph: &CsrGraph, start: NodeId, max_depth: u32) -> Result<Vec<NodeId>> {
    let start_dense = graph.require_dense(start)?;
    let t = Instant::now();

    let mut visited = vec![false; graph.node_count()];
    let mut result = Vec::new();
    let mut queue: VecDeque<(DenseId, u32)> = VecDeque::new();

    visited[start_dense as usize] = true;
    result.push(start);
    queue.push_back((start_dense, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for &next in graph.neighbor_block(current) {
            if !visited[next as usize] {
                visited[next as usize] = true;
                result.push(graph.raw_of(next));
                queue.push_back((next, depth + 1));
            }
        }
    }

    debug!(
        start,
        max_depth,
        found = result.len(),
        elapsed_us = t.elapsed().as_micros() as u64,
        "bfs complete"
    );
    Ok(result)
}

/// Full depth-first reachability over outgoing edges.
///
/// Explicit stack, so traversal depth never grows the call stack. Neighbors
/// are pushed in reverse block order, which makes the first edge in file
/// order the first one explored. Each node is visited exactly once; cycles
/// terminate.
pub fn dfs(graph: &CsrGraph, start: NodeId) -> Result<Vec<NodeId>> {
    let start_dense = graph.require_dense(start)?;
    let t = Instant::now();

    let mut visited = vec![false; graph.node_count()];
    let mut result = Vec::new();
    let mut stack: Vec<DenseId> = vec![start_dense];

    while let Some(current) = stack.pop() {
        if visited[current as usize] {
            continue;
        }
        visited[current as usize] = true;
        result.push(graph.raw_of(current));

        for &next in graph.neighbor_block(current).iter().rev() {
            if !visited[next as usize] {
                stack.push(next);
            }
        }
    }

    debug!(
        start,
        found = result.len(),
        elapsed_us = t.elapsed().as_micros() as u64,
        "dfs complete"
    );
    Ok(result)
}

/// Edges of the subgraph induced by `nodes`.
///
/// Unknown ids are skipped rather than rejected — callers typically pass a
/// traversal result that is already store-valid. Output is ordered by
/// source position in `nodes`, then by edge order within that source's
/// block. Duplicate entries in `nodes` emit their edges again.
pub fn induced_edges(graph: &CsrGraph, nodes: &[NodeId]) -> Vec<(NodeId, NodeId)> {
    // Membership set built once for O(1) target tests.
    let members: FxHashSet<DenseId> = nodes
        .iter()
        .filter_map(|&raw| graph.dense_of(raw))
        .collect();

    let mut edges = Vec::new();
    for &raw in nodes {
        let src = match graph.dense_of(raw) {
            Some(dense) => dense,
            None => continue,
        };
        for &tgt in graph.neighbor_block(src) {
            if members.contains(&tgt) {
                edges.push((raw, graph.raw_of(tgt)));
            }
        }
    }
    edges
}

/// Degree and footprint summary. The footprint and load time pass through
/// from the [`crate::LoadStats`] captured at construction.
pub fn statistics(graph: &CsrGraph) -> GraphStats {
    let mut max_out_degree = 0usize;
    let mut argmax: Option<DenseId> = None;

    for dense in 0..graph.node_count() as DenseId {
        let degree = graph.neighbor_block(dense).len();
        // Strict comparison keeps the first-seen node on ties.
        if argmax.is_none() || degree > max_out_degree {
            max_out_degree = degree;
            argmax = Some(dense);
        }
    }

    let loaded = graph.load_stats();
    GraphStats {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        max_out_degree,
        argmax_node: argmax.map(|dense| graph.raw_of(dense)),
        memory_footprint_bytes: loaded.memory_footprint_bytes,
        load_time: loaded.load_time,
    }
}

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use edgegraph_core::{bfs, dfs, load, statistics, Result};

type Generator = fn(&mut dyn Write, u64) -> std::io::Result<()>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1_000_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: edgegraph-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  tree        3-ary tree (deep paths, sequential ids)");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  random      Erdos-Renyi uniform random edges");
        println!();
        println!("Default node_count: 1000000");
        println!("Each generator writes an edge-list file to the system temp");
        println!("directory, then benchmarks load, BFS, DFS and statistics.");
        return;
    }

    if node_count == 0 {
        eprintln!("node_count must be positive");
        return;
    }

    println!("edgegraph-bench");
    println!("===============");
    println!();

    let generators: Vec<(&str, Generator)> = match mode {
        "tree" => vec![("3-ary tree", gen_tree)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "all" => vec![
            ("3-ary tree", gen_tree as Generator),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Erdos-Renyi random", gen_random),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        if let Err(err) = run_benchmark(name, generator, node_count) {
            eprintln!("{name}: benchmark failed: {err}");
            std::process::exit(1);
        }
    }
}

fn run_benchmark(name: &str, generator: Generator, node_count: u64) -> Result<()> {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let path = edge_file_path(name);
    let t = Instant::now();
    {
        let mut writer = BufWriter::new(File::create(&path)?);
        writeln!(writer, "# edgegraph-bench: {}", name)?;
        generator(&mut writer, node_count)?;
        writer.flush()?;
    }
    println!("Edge list written in {:.2}s: {}", t.elapsed().as_secs_f64(), path.display());

    let (graph, stats) = load(&path)?;
    println!(
        "Loaded in {:.2}s — {} nodes, {} edges, ~{:.0}MB",
        stats.load_time.as_secs_f64(),
        stats.node_count,
        stats.edge_count,
        stats.memory_footprint_bytes as f64 / 1_048_576.0
    );

    // BFS depth sweep from node 0 (root or hub in every generator)
    println!();
    println!("{:>8} {:>12} {:>10}", "depth", "found", "time");
    println!("{:->8} {:->12} {:->10}", "", "", "");

    for depth in [1, 2, 3, 5, 10, 20, 50] {
        let t = Instant::now();
        let result = bfs(&graph, 0, depth)?;
        let elapsed = t.elapsed();
        println!(
            "{:>8} {:>12} {:>8.1}ms",
            depth,
            result.len(),
            elapsed.as_secs_f64() * 1000.0
        );
        // Stop once the whole graph is reached
        if result.len() >= graph.node_count() {
            println!("{:>8} (entire graph reached)", "");
            break;
        }
    }

    println!();
    let t = Instant::now();
    let reachable = dfs(&graph, 0)?;
    println!(
        "DFS from 0: {} nodes in {:.1}ms",
        reachable.len(),
        t.elapsed().as_secs_f64() * 1000.0
    );

    let summary = statistics(&graph);
    match summary.argmax_node {
        Some(node) => println!(
            "Max out-degree: {} at node {}",
            summary.max_out_degree, node
        ),
        None => println!("Empty graph"),
    }
    println!();

    let _ = std::fs::remove_file(&path);
    Ok(())
}

fn edge_file_path(name: &str) -> PathBuf {
    let slug: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    std::env::temp_dir().join(format!("edgegraph-bench-{}.txt", slug))
}

// ---------------------------------------------------------------------------
// Generators — all O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
}

/// Complete 3-ary tree: node k's parent is (k-1)/3.
///
/// Deep, regular structure — exercises the BFS depth sweep level by level
/// and gives DFS a long spine to walk.
fn gen_tree(writer: &mut dyn Write, node_count: u64) -> std::io::Result<()> {
    for child in 1..node_count {
        writeln!(writer, "{} {}", (child - 1) / 3, child)?;
    }
    Ok(())
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random endpoint of an existing edge;
/// high-degree nodes are picked proportionally more often. Produces the
/// skewed degree distribution the statistics query cares about.
fn gen_scale_free(writer: &mut dyn Write, node_count: u64) -> std::io::Result<()> {
    let edges_per_node = 8u64;
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<u64> = Vec::with_capacity((node_count * edges_per_node) as usize);

    // Seed: small clique
    let seed = 5u64.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            writeln!(writer, "{} {}", i, j)?;
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != new_node {
                writeln!(writer, "{} {}", new_node, target)?;
                endpoints.push(new_node);
                endpoints.push(target);
            }
        }
    }
    Ok(())
}

/// Erdos-Renyi: ~10 uniform random edges per node. Baseline topology with
/// no structure; duplicates and the occasional self-loop are left in, which
/// the loader preserves by contract.
fn gen_random(writer: &mut dyn Write, node_count: u64) -> std::io::Result<()> {
    let target_edges = node_count * 10;
    let mut rng = FastRng::new(54321);

    // Anchor the id space so node 0 exists for the BFS sweep
    writeln!(writer, "0 {}", node_count - 1)?;
    for _ in 0..target_edges {
        writeln!(writer, "{} {}", rng.next(node_count), rng.next(node_count))?;
    }
    Ok(())
}

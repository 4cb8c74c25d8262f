use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{CsrGraph, DenseId, NodeId};

/// Metrics captured while building one graph. `load_time` covers the file
/// pass and the CSR build.
#[derive(Debug, Clone)]
pub struct LoadStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub memory_footprint_bytes: usize,
    pub load_time: Duration,
}

/// Parse an edge-list file into a CSR graph.
///
/// One edge per line, `<source> <target>` as whitespace-separated
/// non-negative integers. Lines starting with `#` and blank lines are
/// skipped. Fails with [`GraphError::Io`] if the file cannot be opened and
/// with [`GraphError::Parse`] naming the offending line if any remaining
/// line does not hold exactly two parseable integers. On failure no graph
/// is returned; there is no partially-built state.
pub fn load<P: AsRef<Path>>(path: P) -> Result<(CsrGraph, LoadStats)> {
    let start = Instant::now();
    let file = File::open(path.as_ref())?;
    let mut graph = read_edge_list(BufReader::new(file))?;
    graph.set_load_time(start.elapsed());

    let stats = graph.load_stats().clone();
    debug!(
        nodes = stats.node_count,
        edges = stats.edge_count,
        bytes = stats.memory_footprint_bytes,
        elapsed_ms = stats.load_time.as_millis() as u64,
        "edge list loaded"
    );
    Ok((graph, stats))
}

/// Single forward pass: intern each endpoint (insertion order assigns dense
/// indices) and buffer the dense edge pairs, then hand off to the CSR build.
pub(crate) fn read_edge_list<R: BufRead>(reader: R) -> Result<CsrGraph> {
    let mut raw_to_dense: FxHashMap<NodeId, DenseId> = FxHashMap::default();
    let mut dense_to_raw: Vec<NodeId> = Vec::new();
    let mut edges: Vec<(DenseId, DenseId)> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (src, tgt) = parse_line(trimmed, idx + 1)?;
        let src = intern(&mut raw_to_dense, &mut dense_to_raw, src);
        let tgt = intern(&mut raw_to_dense, &mut dense_to_raw, tgt);
        edges.push((src, tgt));

        if edges.len() % 100_000 == 0 {
            debug!(edges = edges.len(), "load progress");
        }
    }

    Ok(CsrGraph::from_edges(dense_to_raw, raw_to_dense, &edges))
}

fn parse_line(line: &str, lineno: usize) -> Result<(NodeId, NodeId)> {
    let mut fields = line.split_whitespace();

    let mut next = |name: &str| -> Result<NodeId> {
        let field = fields.next().ok_or_else(|| GraphError::Parse {
            line: lineno,
            message: format!("missing {name} field: {line:?}"),
        })?;
        field.parse().map_err(|_| GraphError::Parse {
            line: lineno,
            message: format!("{name} is not a non-negative integer: {field:?}"),
        })
    };

    let src = next("source")?;
    let tgt = next("target")?;
    if fields.next().is_some() {
        return Err(GraphError::Parse {
            line: lineno,
            message: format!("expected exactly two fields: {line:?}"),
        });
    }
    Ok((src, tgt))
}

/// Look up or assign the dense index for a raw id.
fn intern(
    raw_to_dense: &mut FxHashMap<NodeId, DenseId>,
    dense_to_raw: &mut Vec<NodeId>,
    raw: NodeId,
) -> DenseId {
    if let Some(&dense) = raw_to_dense.get(&raw) {
        return dense;
    }
    let dense = dense_to_raw.len() as DenseId;
    dense_to_raw.push(raw);
    raw_to_dense.insert(raw, dense);
    dense
}

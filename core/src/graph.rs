use std::mem::size_of;

use rustc_hash::FxHashMap;

use crate::error::{GraphError, Result};
use crate::loader::LoadStats;

/// Raw node identifier, exactly as it appears in the input file.
pub type NodeId = u64;

/// Dense internal index in `[0, N)`, assigned in first-seen order during
/// load. All adjacency arrays are indexed by dense id; raw ids appear only
/// at the public boundary.
pub(crate) type DenseId = u32;

/// Compressed-sparse-row adjacency store. Built once by the loader, never
/// mutated afterwards.
///
/// `offsets` has length N+1 and is non-decreasing with `offsets[N] == E`.
/// For dense index `i`, `targets[offsets[i]..offsets[i+1]]` lists the dense
/// out-neighbors of `i` in the order their edges appeared in the file.
/// Duplicate edges and self-loops each keep their own slot.
#[derive(Debug)]
pub struct CsrGraph {
    offsets: Vec<u32>,
    targets: Vec<DenseId>,
    raw_to_dense: FxHashMap<NodeId, DenseId>,
    dense_to_raw: Vec<NodeId>,
    memory_bytes: usize,
    stats: LoadStats,
}

impl CsrGraph {
    /// Build the CSR arrays from a fully-read edge buffer.
    ///
    /// Counting pass over the buffer for out-degrees, prefix sum into
    /// `offsets`, then a second pass placing each target at its source's
    /// write cursor — this preserves file order within every block.
    pub(crate) fn from_edges(
        dense_to_raw: Vec<NodeId>,
        raw_to_dense: FxHashMap<NodeId, DenseId>,
        edges: &[(DenseId, DenseId)],
    ) -> Self {
        let n = dense_to_raw.len();

        let mut offsets = vec![0u32; n + 1];
        for &(src, _) in edges {
            offsets[src as usize + 1] += 1;
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }

        let mut cursor: Vec<u32> = offsets[..n].to_vec();
        let mut targets = vec![0 as DenseId; edges.len()];
        for &(src, tgt) in edges {
            let slot = cursor[src as usize] as usize;
            targets[slot] = tgt;
            cursor[src as usize] += 1;
        }

        let memory_bytes = estimate_memory(&offsets, &targets, &dense_to_raw);
        let stats = LoadStats {
            node_count: n,
            edge_count: targets.len(),
            memory_footprint_bytes: memory_bytes,
            load_time: std::time::Duration::ZERO,
        };

        Self {
            offsets,
            targets,
            raw_to_dense,
            dense_to_raw,
            memory_bytes,
            stats,
        }
    }

    pub(crate) fn set_load_time(&mut self, elapsed: std::time::Duration) {
        self.stats.load_time = elapsed;
    }

    pub fn node_count(&self) -> usize {
        self.dense_to_raw.len()
    }

    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    /// Whether `raw` was seen at load time (as either edge endpoint).
    pub fn contains(&self, raw: NodeId) -> bool {
        self.raw_to_dense.contains_key(&raw)
    }

    /// Out-degree of `raw`, counting duplicate edges and self-loops.
    pub fn out_degree(&self, raw: NodeId) -> Result<usize> {
        let dense = self.require_dense(raw)?;
        Ok(self.neighbor_block(dense).len())
    }

    /// Out-neighbors of `raw` in file order, as raw ids. A node with no
    /// outgoing edges yields an empty vec, not an error.
    pub fn neighbors(&self, raw: NodeId) -> Result<Vec<NodeId>> {
        let dense = self.require_dense(raw)?;
        Ok(self
            .neighbor_block(dense)
            .iter()
            .map(|&tgt| self.raw_of(tgt))
            .collect())
    }

    /// Estimated resident size of the CSR arrays plus the id map, computed
    /// once at build time.
    pub fn memory_footprint_bytes(&self) -> usize {
        self.memory_bytes
    }

    pub fn load_stats(&self) -> &LoadStats {
        &self.stats
    }

    pub(crate) fn dense_of(&self, raw: NodeId) -> Option<DenseId> {
        self.raw_to_dense.get(&raw).copied()
    }

    pub(crate) fn require_dense(&self, raw: NodeId) -> Result<DenseId> {
        self.dense_of(raw).ok_or(GraphError::UnknownNode(raw))
    }

    pub(crate) fn raw_of(&self, dense: DenseId) -> NodeId {
        self.dense_to_raw[dense as usize]
    }

    /// Dense out-neighbor slice for a dense index. O(1).
    pub(crate) fn neighbor_block(&self, dense: DenseId) -> &[DenseId] {
        let lo = self.offsets[dense as usize] as usize;
        let hi = self.offsets[dense as usize + 1] as usize;
        &self.targets[lo..hi]
    }

    #[cfg(test)]
    pub(crate) fn offsets(&self) -> &[u32] {
        &self.offsets
    }
}

/// Approximate footprint: the two CSR arrays, the dense→raw array, and a
/// per-entry estimate for the raw→dense hash map.
fn estimate_memory(offsets: &[u32], targets: &[DenseId], dense_to_raw: &[NodeId]) -> usize {
    const MAP_ENTRY_OVERHEAD: usize = 32;

    offsets.len() * size_of::<u32>()
        + targets.len() * size_of::<DenseId>()
        + dense_to_raw.len() * size_of::<NodeId>()
        + dense_to_raw.len() * (size_of::<NodeId>() + size_of::<DenseId>() + MAP_ENTRY_OVERHEAD)
}

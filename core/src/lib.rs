//! edgegraph-core: CSR storage and traversal engine for edge-list graphs.
//!
//! A pure Rust library that parses whitespace-separated integer edge lists
//! into a compressed-sparse-row adjacency structure and answers structural
//! queries against it: bounded BFS, full DFS reachability, neighbor lookup,
//! induced-subgraph edge extraction, and degree statistics.
//!
//! The store is immutable after load. Queries borrow it read-only and
//! allocate their own scratch buffers, so concurrent queries against the
//! same graph need no synchronization.

mod error;
mod graph;
mod loader;
mod query;

pub use error::{GraphError, Result};
pub use graph::{CsrGraph, NodeId};
pub use loader::{load, LoadStats};
pub use query::{bfs, dfs, induced_edges, statistics, GraphStats};

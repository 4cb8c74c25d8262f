use std::io;

use thiserror::Error;

use crate::graph::NodeId;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors surfaced by the loader and the query engine.
///
/// Load failures (`Io`, `Parse`) are fatal to that load — no partial graph
/// is ever returned. Query failures (`UnknownNode`, `InvalidArgument`) are
/// recoverable and leave the store untouched.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Malformed edge-list line. `line` is 1-based and counts every line in
    /// the file, comments and blanks included.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// Invalid query argument from an external caller. Depth arguments are
    /// unsigned in this API, so front-ends validating signed input report
    /// through this variant before calling in.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

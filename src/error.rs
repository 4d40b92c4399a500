//! Error types for the network analysis library

use thiserror::Error;

/// Errors raised by graph loading and the analysis routines
#[derive(Error, Debug)]
pub enum NetError {
    /// IO error while reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in an input file
    #[error("parse error on line {line}: {msg}")]
    Parse { line: usize, msg: String },

    /// A weighted edge list line without a weight column
    #[error("missing weight column on line {line}")]
    MissingWeight { line: usize },

    /// An input sequence that must not be empty was empty
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// The graph has no nodes
    #[error("graph has no nodes")]
    EmptyGraph,

    /// A node index outside the graph
    #[error("unknown node: {0}")]
    UnknownNode(u32),

    /// A parameter outside its valid range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two partitions covering a different number of nodes
    #[error("partitions cover {left} and {right} nodes")]
    PartitionMismatch { left: usize, right: usize },

    /// An iterative method that did not reach its tolerance
    #[error("no convergence after {iterations} iterations")]
    NoConvergence { iterations: usize },

    /// Coordinate map could not be decoded or encoded
    #[error("coordinate map error: {0}")]
    Coordinates(#[from] bincode::Error),
}

/// Result type for library operations
pub type Result<T> = std::result::Result<T, NetError>;

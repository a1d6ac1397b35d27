use std::collections::TryReserveError;

use thiserror::Error;

/// Reasons an analysis run can fail.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// An [IO](std::io) Error while opening or reading the mesh
    #[error("could not read file: {0}")]
    FileUnreadable(#[from] std::io::Error),

    /// Neither the binary nor the ASCII reader produced a vertex
    #[error("no vertices found")]
    NoGeometryFound,

    #[error("malformed vertex on line {line}: could not parse {token:?} as a number")]
    MalformedVertex { line: usize, token: String },

    /// The vertex buffer could not grow to hold the mesh
    #[error("out of memory while collecting vertices: {0}")]
    ResourceExhausted(#[from] TryReserveError),
}

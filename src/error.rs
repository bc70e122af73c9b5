//! Error taxonomy for input validation and configuration.
//!
//! Every variant is raised before `dist`/`pred` are touched; a solve either
//! completes or fails without producing a partial array.

use thiserror::Error;

pub type Result<T, E = SolveError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("graph has no vertices")]
    EmptyGraph,
    #[error("source {vertex} is out of range for a graph of {n} vertices")]
    SourceOutOfRange { vertex: u32, n: usize },
    #[error("malformed CSR offsets: {0}")]
    MalformedOffsets(String),
    #[error("edge {from} -> {to} leaves the vertex range [0, {n})")]
    VertexOutOfRange { from: u32, to: u32, n: usize },
    #[error("adjacency entry for vertex {vertex} lies outside [0, {n})")]
    UnknownVertex { vertex: u32, n: usize },
    #[error("edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight { from: u32, to: u32, weight: f32 },
    #[error("edge {from} -> {to} has a non-finite weight")]
    NonFiniteWeight { from: u32, to: u32 },
    #[error("{0} vertices exceed the supported id space")]
    TooManyVertices(usize),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("could not parse configuration")]
    ConfigParse(#[from] serde_json::Error),
}

impl SolveError {
    /// Status code reported across the C ABI. `-3` (null pointer) is only
    /// produced by the FFI layer itself.
    pub fn code(&self) -> i32 {
        match self {
            SolveError::EmptyGraph => -1,
            SolveError::SourceOutOfRange { .. } => -2,
            SolveError::MalformedOffsets(_) => -4,
            SolveError::VertexOutOfRange { .. } | SolveError::UnknownVertex { .. } => -5,
            SolveError::NegativeWeight { .. } => -6,
            SolveError::NonFiniteWeight { .. } => -7,
            SolveError::TooManyVertices(_) => -8,
            SolveError::InvalidConfig(_) | SolveError::ConfigParse(_) => -9,
        }
    }
}

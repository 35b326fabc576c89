use mush_config::ConfigError;
use mush_topology::TopologyError;
use thiserror::Error;

/// Errors from binding or evaluating the deformer.
///
/// Every error is fatal for the call that raised it: no output buffer is
/// produced and the current bind is left untouched.
#[derive(Debug, Error)]
pub enum DeformError {
    #[error("invalid reference topology: {0}")]
    InvalidTopology(#[from] TopologyError),
    #[error("vertex count mismatch: bound {expected}, got {actual}")]
    VertexCountMismatch { expected: usize, actual: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("flat position buffer of {len} floats is not a whole number of vertices")]
    MalformedBuffer { len: usize },
}

pub type DeformResult<T> = Result<T, DeformError>;

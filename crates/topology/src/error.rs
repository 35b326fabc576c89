//! Error types for reference topology extraction.

use thiserror::Error;

/// Result type alias for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Errors raised while building or querying a reference surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    /// The reference surface has no vertices.
    #[error("reference mesh has no vertices")]
    EmptyMesh,

    /// A face references a vertex outside the position buffer.
    #[error("face {face} references vertex {vertex}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        vertex: u32,
        vertex_count: usize,
    },

    /// Ring list and position buffer disagree on the vertex count.
    #[error("{rings} neighbor rings supplied for {positions} positions")]
    RingCountMismatch { rings: usize, positions: usize },

    /// The surface could not report the neighbors of a vertex.
    #[error("neighbor query failed for vertex {vertex}: {reason}")]
    NeighborQuery { vertex: usize, reason: String },

    /// A ring names a neighbor that does not exist.
    #[error("vertex {vertex} lists neighbor {neighbor}, but the mesh has {vertex_count} vertices")]
    NeighborOutOfRange {
        vertex: usize,
        neighbor: u32,
        vertex_count: usize,
    },

    /// A ring names the vertex itself.
    #[error("vertex {vertex} lists itself as a neighbor")]
    SelfNeighbor { vertex: usize },

    /// The surface has no position for a vertex it claims to own.
    #[error("no position for vertex {vertex}")]
    MissingPosition { vertex: usize },

    /// Structural inconsistency in the half-edge mesh.
    #[error("invalid mesh topology: {0}")]
    InvalidTopology(String),
}

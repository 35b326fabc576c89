//! Half-edge mesh data structure for reference topology.
//!
//! Provides ordered vertex rings (the neighbors of a vertex in fan order)
//! that a plain index buffer does not expose directly.

mod construction;
mod topology;
mod types;
mod validation;

use std::collections::HashMap;

pub use types::{Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId};
pub use validation::ManifoldError;

use crate::ring::VertexRing;
use crate::surface::TopologyKey;

/// Polygon mesh with explicit half-edge connectivity.
///
/// Built once from a position buffer and a face list. Rings and the
/// topology key are computed at construction and cached, since connectivity
/// never changes afterwards.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) half_edges: Vec<HalfEdge>,
    pub(crate) faces: Vec<Face>,
    /// Directed `(origin, destination)` lookup
    pub(crate) edge_map: HashMap<(VertexId, VertexId), HalfEdgeId>,
    pub(crate) rings: Vec<VertexRing>,
    pub(crate) topology_key: TopologyKey,
}

//! Element records of a half-edge mesh.
//!
//! Every id is the element's index in its owning `Vec`.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub u32);

#[derive(Debug, Clone)]
pub struct Vertex {
    pub id: VertexId,
    pub position: Vec3,
    /// Some half-edge leaving this vertex; `None` if no face uses it
    pub outgoing: Option<HalfEdgeId>,
}

/// One directed side of an edge, owned by exactly one face.
#[derive(Debug, Clone)]
pub struct HalfEdge {
    pub id: HalfEdgeId,
    pub origin: VertexId,
    /// Oppositely directed half-edge of the neighboring face, if any
    pub twin: Option<HalfEdgeId>,
    /// Successor within the face loop
    pub next: HalfEdgeId,
    /// Predecessor within the face loop
    pub prev: HalfEdgeId,
    pub face: FaceId,
}

#[derive(Debug, Clone)]
pub struct Face {
    pub id: FaceId,
    /// Half-edge leaving the face's first corner
    pub first_edge: HalfEdgeId,
    /// Corner count
    pub arity: u32,
}

//! The reference surface seen by the deformer.
//!
//! A deformer only needs three things from its reference mesh: how many
//! vertices it has, where they are, and who their neighbors are. Anything
//! that can answer those queries can drive a bind.

use glam::Vec3;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::{TopologyError, TopologyResult};
use crate::half_edge::{HalfEdgeMesh, VertexId};
use crate::ring::{RingMesh, VertexRing};

/// Identifies a mesh connectivity by value.
///
/// Two surfaces with the same vertex count and identical rings (including
/// ring order) produce the same key. Positions do not participate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TopologyKey(pub u64);

impl TopologyKey {
    pub fn from_rings(rings: &[VertexRing]) -> Self {
        let mut hasher = DefaultHasher::new();
        rings.len().hash(&mut hasher);
        for ring in rings {
            ring.hash(&mut hasher);
        }
        Self(hasher.finish())
    }

    /// Hash a surface by querying every ring.
    ///
    /// A failed query hashes a marker instead; the subsequent bind reports
    /// the real error.
    pub fn of_surface<S: ReferenceSurface + ?Sized>(surface: &S) -> Self {
        let mut hasher = DefaultHasher::new();
        let count = surface.vertex_count();
        count.hash(&mut hasher);
        for vertex in 0..count {
            match surface.connected_vertices(vertex) {
                Ok(neighbors) => VertexRing::new(neighbors).hash(&mut hasher),
                Err(_) => u64::MAX.hash(&mut hasher),
            }
        }
        Self(hasher.finish())
    }
}

/// Query interface of a bind-pose reference mesh.
pub trait ReferenceSurface {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Position of a vertex, `None` when out of range.
    fn position(&self, vertex: usize) -> Option<Vec3>;

    /// Neighbors of a vertex in a deterministic ring order.
    fn connected_vertices(&self, vertex: usize) -> TopologyResult<Vec<u32>>;

    /// Connectivity key, compared by value between evaluations to detect
    /// topology changes. Implementors that cache their rings should override
    /// the default, which walks every ring.
    fn topology_key(&self) -> TopologyKey {
        TopologyKey::of_surface(self)
    }
}

impl ReferenceSurface for HalfEdgeMesh {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn position(&self, vertex: usize) -> Option<Vec3> {
        self.vertices.get(vertex).map(|v| v.position)
    }

    fn connected_vertices(&self, vertex: usize) -> TopologyResult<Vec<u32>> {
        self.ring(VertexId(vertex as u32))
            .map(|ring| ring.neighbors().to_vec())
            .ok_or_else(|| TopologyError::NeighborQuery {
                vertex,
                reason: "vertex index out of range".to_string(),
            })
    }

    fn topology_key(&self) -> TopologyKey {
        self.topology_key
    }
}

impl ReferenceSurface for RingMesh {
    fn vertex_count(&self) -> usize {
        self.positions().len()
    }

    fn position(&self, vertex: usize) -> Option<Vec3> {
        self.positions().get(vertex).copied()
    }

    fn connected_vertices(&self, vertex: usize) -> TopologyResult<Vec<u32>> {
        self.rings()
            .get(vertex)
            .map(|ring| ring.neighbors().to_vec())
            .ok_or_else(|| TopologyError::NeighborQuery {
                vertex,
                reason: "vertex index out of range".to_string(),
            })
    }

    fn topology_key(&self) -> TopologyKey {
        RingMesh::topology_key(self)
    }
}

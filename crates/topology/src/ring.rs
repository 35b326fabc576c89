//! Ordered neighbor rings.

use glam::Vec3;

use crate::error::{TopologyError, TopologyResult};
use crate::surface::TopologyKey;

/// The ordered neighbors of one vertex.
///
/// Order matters: each consecutive pair of neighbors spans one tangent frame,
/// so a ring of `n` neighbors yields `n - 1` frame pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VertexRing {
    neighbors: Vec<u32>,
}

impl VertexRing {
    pub fn new(neighbors: Vec<u32>) -> Self {
        Self { neighbors }
    }

    /// Neighbor vertex indices in ring order.
    pub fn neighbors(&self) -> &[u32] {
        &self.neighbors
    }

    /// Ring size.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Number of consecutive neighbor pairs, `max(len - 1, 0)`.
    pub fn pair_count(&self) -> usize {
        self.neighbors.len().saturating_sub(1)
    }

    /// Consecutive neighbor pairs `(n, n + 1)` in ring order.
    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.neighbors.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

impl AsRef<VertexRing> for VertexRing {
    fn as_ref(&self) -> &VertexRing {
        self
    }
}

impl From<Vec<u32>> for VertexRing {
    fn from(neighbors: Vec<u32>) -> Self {
        Self::new(neighbors)
    }
}

/// A reference surface given directly as positions plus rings.
///
/// For hosts that already own adjacency and only need to hand it over.
#[derive(Debug, Clone)]
pub struct RingMesh {
    positions: Vec<Vec3>,
    rings: Vec<VertexRing>,
    topology_key: TopologyKey,
}

impl RingMesh {
    /// Create a ring mesh, checking that every ring entry is a valid,
    /// distinct-from-self vertex index.
    pub fn new(positions: Vec<Vec3>, rings: Vec<VertexRing>) -> TopologyResult<Self> {
        if positions.is_empty() {
            return Err(TopologyError::EmptyMesh);
        }
        if rings.len() != positions.len() {
            return Err(TopologyError::RingCountMismatch {
                rings: rings.len(),
                positions: positions.len(),
            });
        }
        for (vertex, ring) in rings.iter().enumerate() {
            check_ring(vertex, ring.neighbors(), positions.len())?;
        }

        let topology_key = TopologyKey::from_rings(&rings);
        Ok(Self {
            positions,
            rings,
            topology_key,
        })
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn rings(&self) -> &[VertexRing] {
        &self.rings
    }

    pub fn topology_key(&self) -> TopologyKey {
        self.topology_key
    }

    /// Replace the positions, keeping connectivity.
    pub fn set_positions(&mut self, positions: Vec<Vec3>) -> TopologyResult<()> {
        if positions.len() != self.rings.len() {
            return Err(TopologyError::RingCountMismatch {
                rings: self.rings.len(),
                positions: positions.len(),
            });
        }
        self.positions = positions;
        Ok(())
    }
}

/// Validate one ring against the vertex count.
pub(crate) fn check_ring(vertex: usize, neighbors: &[u32], vertex_count: usize) -> TopologyResult<()> {
    for &neighbor in neighbors {
        if neighbor as usize >= vertex_count {
            return Err(TopologyError::NeighborOutOfRange {
                vertex,
                neighbor,
                vertex_count,
            });
        }
        if neighbor as usize == vertex {
            return Err(TopologyError::SelfNeighbor { vertex });
        }
    }
    Ok(())
}

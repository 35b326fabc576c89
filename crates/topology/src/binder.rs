//! Extraction of the static adjacency a bind works from.

use glam::Vec3;

use crate::error::{TopologyError, TopologyResult};
use crate::ring::{check_ring, VertexRing};
use crate::surface::ReferenceSurface;

/// Query the ordered ring of every vertex of a reference surface.
///
/// Fails on an empty surface, on any failed neighbor query, and on rings
/// naming a missing vertex or the vertex itself.
pub fn bind_topology<S: ReferenceSurface + ?Sized>(surface: &S) -> TopologyResult<Vec<VertexRing>> {
    let vertex_count = surface.vertex_count();
    if vertex_count == 0 {
        return Err(TopologyError::EmptyMesh);
    }

    let mut rings = Vec::with_capacity(vertex_count);
    for vertex in 0..vertex_count {
        let neighbors = surface.connected_vertices(vertex)?;
        check_ring(vertex, &neighbors, vertex_count)?;
        rings.push(VertexRing::new(neighbors));
    }

    Ok(rings)
}

/// Read every bind-pose position of a reference surface.
pub fn bind_positions<S: ReferenceSurface + ?Sized>(surface: &S) -> TopologyResult<Vec<Vec3>> {
    let vertex_count = surface.vertex_count();
    if vertex_count == 0 {
        return Err(TopologyError::EmptyMesh);
    }

    (0..vertex_count)
        .map(|vertex| {
            surface
                .position(vertex)
                .ok_or(TopologyError::MissingPosition { vertex })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;
    use crate::surface::TopologyKey;

    struct Faulty {
        fail_at: usize,
    }

    impl ReferenceSurface for Faulty {
        fn vertex_count(&self) -> usize {
            3
        }
        fn position(&self, vertex: usize) -> Option<Vec3> {
            (vertex < 3).then_some(Vec3::ZERO)
        }
        fn connected_vertices(&self, vertex: usize) -> TopologyResult<Vec<u32>> {
            if vertex == self.fail_at {
                return Err(TopologyError::NeighborQuery {
                    vertex,
                    reason: "host refused".to_string(),
                });
            }
            Ok(vec![((vertex + 1) % 3) as u32])
        }
        fn topology_key(&self) -> TopologyKey {
            TopologyKey(7)
        }
    }

    struct Empty;

    impl ReferenceSurface for Empty {
        fn vertex_count(&self) -> usize {
            0
        }
        fn position(&self, _vertex: usize) -> Option<Vec3> {
            None
        }
        fn connected_vertices(&self, vertex: usize) -> TopologyResult<Vec<u32>> {
            Err(TopologyError::NeighborQuery {
                vertex,
                reason: "empty".to_string(),
            })
        }
    }

    #[test]
    fn test_grid_rings_extracted() {
        let mesh = primitives::grid(3, 3, 1.0).unwrap();
        let rings = bind_topology(&mesh).unwrap();

        assert_eq!(rings.len(), 9);
        assert_eq!(rings[4].len(), 4);
        assert_eq!(rings[1].len(), 3);
        assert_eq!(rings[0].len(), 2);
        assert_eq!(rings.as_slice(), mesh.rings());
    }

    #[test]
    fn test_empty_surface_rejected() {
        assert_eq!(bind_topology(&Empty).unwrap_err(), TopologyError::EmptyMesh);
        assert_eq!(bind_positions(&Empty).unwrap_err(), TopologyError::EmptyMesh);
    }

    #[test]
    fn test_failed_query_propagates() {
        let err = bind_topology(&Faulty { fail_at: 2 }).unwrap_err();
        assert!(matches!(err, TopologyError::NeighborQuery { vertex: 2, .. }));
    }

    #[test]
    fn test_positions_read_in_order() {
        let mesh = primitives::grid(2, 2, 2.0).unwrap();
        let positions = bind_positions(&mesh).unwrap();

        assert_eq!(positions, mesh.positions());
    }
}

//! Building a half-edge mesh from face lists.

use glam::Vec3;
use std::collections::{BTreeSet, HashMap};

use super::types::{Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId};
use super::HalfEdgeMesh;
use crate::error::{TopologyError, TopologyResult};
use crate::ring::VertexRing;
use crate::surface::TopologyKey;

impl HalfEdgeMesh {
    /// Build a half-edge mesh from a triangle index buffer.
    pub fn from_triangles(positions: &[Vec3], indices: &[u32]) -> TopologyResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(TopologyError::InvalidTopology(
                format!("triangle index count {} is not a multiple of 3", indices.len()),
            ));
        }

        let triangles: Vec<&[u32]> = indices.chunks(3).collect();
        Self::from_polygons(positions, &triangles)
    }

    /// Build a half-edge mesh from polygon faces of any arity.
    ///
    /// Faces must share a consistent winding for rings to come out in fan
    /// order. Repeated consecutive corners are dropped; faces left with fewer
    /// than three distinct corners are skipped. Vertices referenced by no
    /// face stay in the mesh as isolated vertices with empty rings.
    pub fn from_polygons<F: AsRef<[u32]>>(positions: &[Vec3], faces: &[F]) -> TopologyResult<Self> {
        if positions.is_empty() {
            return Err(TopologyError::EmptyMesh);
        }

        let mut vertices: Vec<Vertex> = positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex {
                id: VertexId(i as u32),
                position,
                outgoing: None,
            })
            .collect();

        let mut half_edges: Vec<HalfEdge> = Vec::new();
        let mut mesh_faces: Vec<Face> = Vec::new();
        let mut edge_map: HashMap<(VertexId, VertexId), HalfEdgeId> = HashMap::new();
        let mut skipped_faces = 0usize;
        let mut duplicate_edges = 0usize;

        for (face_idx, face) in faces.iter().enumerate() {
            let corners = match face_corners(face_idx, face.as_ref(), positions.len())? {
                Some(corners) => corners,
                None => {
                    skipped_faces += 1;
                    continue;
                }
            };

            let face_id = FaceId(mesh_faces.len() as u32);
            let base = half_edges.len() as u32;
            let arity = corners.len() as u32;

            for (k, &corner) in corners.iter().enumerate() {
                let k = k as u32;
                let he_id = HalfEdgeId(base + k);
                half_edges.push(HalfEdge {
                    id: he_id,
                    origin: VertexId(corner),
                    twin: None,
                    next: HalfEdgeId(base + (k + 1) % arity),
                    prev: HalfEdgeId(base + (k + arity - 1) % arity),
                    face: face_id,
                });

                let vertex = &mut vertices[corner as usize];
                if vertex.outgoing.is_none() {
                    vertex.outgoing = Some(he_id);
                }
            }

            // Register directed edges and link twins
            for (k, &origin) in corners.iter().enumerate() {
                let dest = corners[(k + 1) % corners.len()];
                let he_id = HalfEdgeId(base + k as u32);
                let key = (VertexId(origin), VertexId(dest));

                if edge_map.contains_key(&key) {
                    duplicate_edges += 1;
                    continue;
                }

                if let Some(&twin_id) = edge_map.get(&(VertexId(dest), VertexId(origin))) {
                    if half_edges[twin_id.0 as usize].twin.is_none() {
                        half_edges[he_id.0 as usize].twin = Some(twin_id);
                        half_edges[twin_id.0 as usize].twin = Some(he_id);
                    }
                }
                edge_map.insert(key, he_id);
            }

            mesh_faces.push(Face {
                id: face_id,
                first_edge: HalfEdgeId(base),
                arity,
            });
        }

        if skipped_faces > 0 {
            tracing::debug!("from_polygons: skipped {} degenerate faces", skipped_faces);
        }
        if duplicate_edges > 0 {
            tracing::warn!(
                "from_polygons: {} directed edges appear in more than one face (inconsistent winding or non-manifold input)",
                duplicate_edges
            );
        }

        let mut mesh = Self {
            vertices,
            half_edges,
            faces: mesh_faces,
            edge_map,
            rings: Vec::new(),
            topology_key: TopologyKey::default(),
        };
        mesh.rings = mesh.compute_rings();
        mesh.topology_key = TopologyKey::from_rings(&mesh.rings);

        // Each directed edge in at most one face leaves no room for broken links
        if duplicate_edges == 0 {
            debug_assert!(mesh.validate().is_ok(), "from_polygons: {:?}", mesh.validate());
        }

        Ok(mesh)
    }

    /// Compute the ordered ring of every vertex.
    ///
    /// The fan walk covers a single manifold fan. Neighbors it cannot reach
    /// (non-manifold vertices joining several fans) are appended in ascending
    /// index order so the result stays deterministic.
    fn compute_rings(&self) -> Vec<VertexRing> {
        let mut adjacency: Vec<BTreeSet<u32>> = vec![BTreeSet::new(); self.vertices.len()];
        for he in &self.half_edges {
            if let Some(dest) = self.destination(he.id) {
                adjacency[he.origin.0 as usize].insert(dest.0);
                adjacency[dest.0 as usize].insert(he.origin.0);
            }
        }

        let mut completed = 0usize;
        let rings = self
            .vertices
            .iter()
            .map(|vertex| {
                let mut ring: Vec<u32> = self
                    .walk_ring(vertex.id)
                    .into_iter()
                    .map(|id| id.0)
                    .collect();

                let all = &adjacency[vertex.id.0 as usize];
                if ring.len() < all.len() {
                    completed += 1;
                    for &neighbor in all {
                        if !ring.contains(&neighbor) {
                            ring.push(neighbor);
                        }
                    }
                }

                VertexRing::new(ring)
            })
            .collect();

        if completed > 0 {
            tracing::warn!(
                "compute_rings: {} vertices span several fans, rings completed from adjacency",
                completed
            );
        }

        rings
    }
}

/// Clean up one face's corner list.
///
/// Returns `None` for faces that collapse below three distinct corners.
fn face_corners(face_idx: usize, face: &[u32], vertex_count: usize) -> TopologyResult<Option<Vec<u32>>> {
    if let Some(&vertex) = face.iter().find(|&&v| v as usize >= vertex_count) {
        return Err(TopologyError::FaceIndexOutOfRange {
            face: face_idx,
            vertex,
            vertex_count,
        });
    }

    let mut corners: Vec<u32> = Vec::with_capacity(face.len());
    for &v in face {
        if corners.last() != Some(&v) {
            corners.push(v);
        }
    }
    while corners.len() > 1 && corners.first() == corners.last() {
        corners.pop();
    }

    let distinct: BTreeSet<u32> = corners.iter().copied().collect();
    if corners.len() < 3 || distinct.len() != corners.len() {
        return Ok(None);
    }

    Ok(Some(corners))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_positions_rejected() {
        let result = HalfEdgeMesh::from_triangles(&[], &[]);
        assert_eq!(result.unwrap_err(), TopologyError::EmptyMesh);
    }

    #[test]
    fn test_index_count_not_divisible_by_three() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
        assert!(matches!(
            HalfEdgeMesh::from_triangles(&positions, &[0, 1]),
            Err(TopologyError::InvalidTopology(_))
        ));
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let err = HalfEdgeMesh::from_triangles(&positions, &[0, 1, 7]).unwrap_err();
        assert_eq!(
            err,
            TopologyError::FaceIndexOutOfRange {
                face: 0,
                vertex: 7,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_degenerate_faces_skipped() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
        let faces: Vec<Vec<u32>> = vec![vec![0, 1, 2], vec![1, 1, 3], vec![2, 3, 2, 3]];
        let mesh = HalfEdgeMesh::from_polygons(&positions, &faces).unwrap();

        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.ring(VertexId(3)).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_corners_collapsed() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y];
        let faces = [[0u32, 0, 1, 2, 3, 0]];
        let mesh = HalfEdgeMesh::from_polygons(&positions, &faces).unwrap();

        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.face(FaceId(0)).unwrap().arity, 4);
    }

    #[test]
    fn test_built_meshes_pass_validation() {
        let positions = [
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::Y,
            Vec3::new(2.0, 0.5, 0.0),
            Vec3::splat(9.0),
        ];
        let faces: Vec<Vec<u32>> = vec![vec![0, 1, 2, 3], vec![1, 4, 2], vec![3, 3, 0]];
        let mesh = HalfEdgeMesh::from_polygons(&positions, &faces).unwrap();

        assert_eq!(mesh.face_count(), 2);
        assert!(mesh.validate().is_ok());
        assert!(mesh.check_manifold().is_ok());
    }

    #[test]
    fn test_inconsistent_winding_still_builds() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::NEG_Y];
        // Both faces run 0 -> 1
        let mesh = HalfEdgeMesh::from_triangles(&positions, &[0, 1, 2, 0, 1, 3]).unwrap();

        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.rings().len(), 4);
    }

    #[test]
    fn test_unreferenced_vertex_is_isolated() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::splat(5.0)];
        let mesh = HalfEdgeMesh::from_triangles(&positions, &[0, 1, 2]).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert!(mesh.vertex(VertexId(3)).unwrap().outgoing.is_none());
        assert!(mesh.ring(VertexId(3)).unwrap().is_empty());
    }
}

//! Structural checks on a built half-edge mesh.

use thiserror::Error;

use super::types::{Face, HalfEdgeId, VertexId};
use super::HalfEdgeMesh;
use crate::error::{TopologyError, TopologyResult};

/// Ways a mesh can fail to be a 2-manifold.
///
/// Non-manifold meshes still bind: rings of vertices joining several fans are
/// completed from raw adjacency, so their tangent frames are less meaningful.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ManifoldError {
    #[error("non-manifold edge {edge:?}: twin does not run the opposite way")]
    TwinDirection { edge: HalfEdgeId },
    #[error(
        "non-manifold vertex {vertex:?}: {neighbors} neighbors around {faces} faces (boundary: {boundary})"
    )]
    BrokenFan {
        vertex: VertexId,
        neighbors: usize,
        faces: usize,
        boundary: bool,
    },
}

impl HalfEdgeMesh {
    /// Check internal consistency: outgoing edges start at their vertex,
    /// twins point back at each other, and every face loop closes after
    /// exactly its arity.
    ///
    /// Debug builds run this at the end of construction whenever no directed
    /// edge was shared by two faces.
    pub fn validate(&self) -> TopologyResult<()> {
        for vertex in &self.vertices {
            let Some(edge) = vertex.outgoing else {
                continue;
            };
            match self.half_edge(edge) {
                Some(he) if he.origin == vertex.id => {}
                Some(he) => {
                    return Err(invalid(format!(
                        "vertex {} leaves along {:?}, which starts at {:?}",
                        vertex.id.0, edge, he.origin
                    )));
                }
                None => return Err(invalid(format!("vertex {} names missing {:?}", vertex.id.0, edge))),
            }
        }

        for he in &self.half_edges {
            if let Some(twin) = he.twin {
                let back = self.half_edge(twin).and_then(|t| t.twin);
                if back != Some(he.id) {
                    return Err(invalid(format!("{:?} and {:?} are not mutual twins", he.id, twin)));
                }
            }
        }

        self.faces.iter().try_for_each(|face| self.check_face_loop(face))
    }

    fn check_face_loop(&self, face: &Face) -> TopologyResult<()> {
        let mut current = face.first_edge;
        for step in 1..=face.arity {
            let he = self
                .half_edge(current)
                .ok_or_else(|| invalid(format!("face {} reaches missing {:?}", face.id.0, current)))?;
            if he.face != face.id {
                return Err(invalid(format!("{:?} sits in face {} but belongs to {:?}", current, face.id.0, he.face)));
            }
            current = he.next;
            if current == face.first_edge {
                return if step < 3 {
                    Err(invalid(format!("face {} has only {} corners", face.id.0, step)))
                } else if step != face.arity {
                    Err(invalid(format!("face {} closes after {} of {} corners", face.id.0, step, face.arity)))
                } else {
                    Ok(())
                };
            }
        }
        Err(invalid(format!("face {} does not close after {} corners", face.id.0, face.arity)))
    }

    /// Check that every twin runs opposite to its half-edge and that every
    /// used vertex sits in a single fan.
    ///
    /// An interior vertex has as many neighbors as faces, a boundary vertex
    /// one more. Nothing on the bind path calls this; hosts use it to
    /// diagnose meshes whose rings fell back to raw adjacency.
    pub fn check_manifold(&self) -> Result<(), ManifoldError> {
        for he in &self.half_edges {
            let Some(twin) = he.twin.and_then(|t| self.half_edge(t)) else {
                continue;
            };
            if self.destination(he.id) != Some(twin.origin) {
                return Err(ManifoldError::TwinDirection { edge: he.id });
            }
        }

        for vertex in self.vertices.iter().filter(|v| v.outgoing.is_some()) {
            let walked = self.walk_ring(vertex.id).len();
            let neighbors = self.ring(vertex.id).map_or(0, |ring| ring.len());
            let faces = self.faces_around(vertex.id).len();
            let boundary = self.is_boundary_vertex(vertex.id);

            if walked != neighbors || neighbors != faces + usize::from(boundary) {
                return Err(ManifoldError::BrokenFan {
                    vertex: vertex.id,
                    neighbors,
                    faces,
                    boundary,
                });
            }
        }

        Ok(())
    }
}

fn invalid(message: String) -> TopologyError {
    TopologyError::InvalidTopology(message)
}

//! Adjacency queries on a built half-edge mesh.

use glam::Vec3;
use std::collections::HashSet;

use super::types::{Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId};
use super::HalfEdgeMesh;
use crate::ring::VertexRing;
use crate::surface::TopologyKey;

impl HalfEdgeMesh {
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0 as usize)
    }

    pub fn half_edge(&self, id: HalfEdgeId) -> Option<&HalfEdge> {
        self.half_edges.get(id.0 as usize)
    }

    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id.0 as usize)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Undirected edge count: twinned half-edge pairs count once.
    pub fn edge_count(&self) -> usize {
        let twinned = self.half_edges.iter().filter(|he| he.twin.is_some()).count();
        twinned / 2 + (self.half_edges.len() - twinned)
    }

    /// All vertex positions in index order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Move a vertex. Connectivity, and therefore rings and the topology
    /// key, are unaffected.
    pub fn set_vertex_position(&mut self, vertex: VertexId, position: Vec3) {
        if let Some(v) = self.vertices.get_mut(vertex.0 as usize) {
            v.position = position;
        }
    }

    /// Ordered neighbor ring of a vertex.
    pub fn ring(&self, vertex: VertexId) -> Option<&VertexRing> {
        self.rings.get(vertex.0 as usize)
    }

    /// Ordered neighbor rings of all vertices, in vertex order.
    pub fn rings(&self) -> &[VertexRing] {
        &self.rings
    }

    /// Key identifying this mesh's connectivity.
    pub fn topology_key(&self) -> TopologyKey {
        self.topology_key
    }

    /// First outgoing half-edge of a vertex's fan.
    ///
    /// The outgoing half-edge preceding `h` in fan order is `twin(h).next`;
    /// rewinding stops at a half-edge without twin (a boundary) or after a
    /// full turn around an interior vertex.
    fn fan_start(&self, vertex: VertexId) -> Option<HalfEdgeId> {
        let start = self.vertex(vertex)?.outgoing?;
        let mut first = start;
        let mut seen = HashSet::new();
        while seen.insert(first) {
            let previous = self
                .half_edge(first)
                .and_then(|he| he.twin)
                .and_then(|twin| self.half_edge(twin))
                .map(|he| he.next);
            match previous {
                Some(previous) if previous != start => first = previous,
                _ => break,
            }
        }
        Some(first)
    }

    /// Outgoing half-edges of a vertex in fan order, plus the incoming
    /// boundary half-edge that closes an open fan.
    fn fan(&self, vertex: VertexId) -> (Vec<HalfEdgeId>, Option<HalfEdgeId>) {
        let mut outgoing = Vec::new();
        let Some(first) = self.fan_start(vertex) else {
            return (outgoing, None);
        };

        let mut current = first;
        while !outgoing.contains(&current) {
            outgoing.push(current);
            let Some(incoming) = self.half_edge(current).and_then(|he| self.half_edge(he.prev)) else {
                break;
            };
            match incoming.twin {
                Some(twin) if twin == first => break,
                Some(twin) => current = twin,
                None => return (outgoing, Some(incoming.id)),
            }
        }
        (outgoing, None)
    }

    /// Neighbors of a vertex in fan order.
    ///
    /// Open fans start at the boundary, so consecutive entries always share
    /// a face and the closing boundary neighbor comes last.
    pub(crate) fn walk_ring(&self, vertex: VertexId) -> Vec<VertexId> {
        let (outgoing, closing) = self.fan(vertex);
        let mut neighbors: Vec<VertexId> = Vec::with_capacity(outgoing.len() + 1);
        let ends = outgoing
            .iter()
            .filter_map(|&he| self.destination(he))
            .chain(closing.and_then(|he| self.half_edge(he)).map(|he| he.origin));
        for neighbor in ends {
            if !neighbors.contains(&neighbor) {
                neighbors.push(neighbor);
            }
        }
        neighbors
    }

    /// Faces around a vertex in fan order.
    pub fn faces_around(&self, vertex: VertexId) -> Vec<FaceId> {
        let mut faces: Vec<FaceId> = Vec::new();
        for he in self.fan(vertex).0 {
            if let Some(face) = self.half_edge(he).map(|he| he.face) {
                if !faces.contains(&face) {
                    faces.push(face);
                }
            }
        }
        faces
    }

    /// Corners of a face in winding order.
    pub fn face_vertices(&self, face: FaceId) -> Vec<VertexId> {
        self.face_loop(face)
            .into_iter()
            .filter_map(|he| self.half_edge(he).map(|he| he.origin))
            .collect()
    }

    /// Half-edges of a face in winding order.
    pub fn face_loop(&self, face: FaceId) -> Vec<HalfEdgeId> {
        let Some(face) = self.face(face) else {
            return Vec::new();
        };

        let mut edges = Vec::with_capacity(face.arity as usize);
        let mut current = face.first_edge;
        while edges.len() < face.arity as usize {
            edges.push(current);
            match self.half_edge(current) {
                Some(he) if he.next != face.first_edge => current = he.next,
                _ => break,
            }
        }
        edges
    }

    /// Vertex a half-edge points at.
    pub fn destination(&self, he: HalfEdgeId) -> Option<VertexId> {
        let next = self.half_edge(he)?.next;
        self.half_edge(next).map(|he| he.origin)
    }

    /// The half-edge running `from` -> `to`, if some face has that side.
    pub fn directed_edge(&self, from: VertexId, to: VertexId) -> Option<HalfEdgeId> {
        self.edge_map.get(&(from, to)).copied()
    }

    /// Whether a half-edge lacks a twin. Unknown ids count as boundary.
    pub fn is_boundary_edge(&self, he: HalfEdgeId) -> bool {
        self.half_edge(he).is_none_or(|he| he.twin.is_none())
    }

    /// Whether a vertex lies on an open fan. Isolated vertices count as
    /// boundary vertices.
    pub fn is_boundary_vertex(&self, vertex: VertexId) -> bool {
        match self.fan(vertex) {
            (outgoing, _) if outgoing.is_empty() => true,
            (outgoing, closing) => closing.is_some() || outgoing.iter().any(|&he| self.is_boundary_edge(he)),
        }
    }
}

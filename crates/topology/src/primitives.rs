//! Procedural reference meshes.
//!
//! Small quad meshes with known connectivity, used for previews, tests and
//! benchmarks.

use glam::Vec3;
use std::f32::consts::TAU;

use crate::error::{TopologyError, TopologyResult};
use crate::half_edge::HalfEdgeMesh;

/// Flat quad grid in the XZ plane, centered on the origin, faces wound so
/// their normals point along +Y.
///
/// Vertices are row-major: vertex `row * cols + col` sits at
/// `((col - (cols - 1) / 2) * spacing, 0, (row - (rows - 1) / 2) * spacing)`.
pub fn grid(cols: u32, rows: u32, spacing: f32) -> TopologyResult<HalfEdgeMesh> {
    if cols < 2 || rows < 2 {
        return Err(TopologyError::InvalidTopology(format!(
            "grid needs at least 2x2 vertices, got {}x{}",
            cols, rows
        )));
    }

    let half_width = (cols - 1) as f32 * 0.5;
    let half_depth = (rows - 1) as f32 * 0.5;

    let mut positions = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            positions.push(Vec3::new(
                (col as f32 - half_width) * spacing,
                0.0,
                (row as f32 - half_depth) * spacing,
            ));
        }
    }

    let mut faces = Vec::with_capacity(((cols - 1) * (rows - 1)) as usize);
    for row in 0..rows - 1 {
        for col in 0..cols - 1 {
            let i = row * cols + col;
            faces.push([i, i + cols, i + cols + 1, i + 1]);
        }
    }

    HalfEdgeMesh::from_polygons(&positions, &faces)
}

/// Open cylinder around the Y axis, `levels` quad bands high.
///
/// Vertex `level * segments + segment` sits at height
/// `level * height / levels - height / 2`.
pub fn cylinder(segments: u32, levels: u32, radius: f32, height: f32) -> TopologyResult<HalfEdgeMesh> {
    if segments < 3 || levels < 1 {
        return Err(TopologyError::InvalidTopology(format!(
            "cylinder needs at least 3 segments and 1 level, got {} and {}",
            segments, levels
        )));
    }

    let mut positions = Vec::with_capacity((segments * (levels + 1)) as usize);
    for level in 0..=levels {
        let y = level as f32 * height / levels as f32 - height * 0.5;
        for segment in 0..segments {
            let angle = segment as f32 / segments as f32 * TAU;
            positions.push(Vec3::new(radius * angle.cos(), y, radius * angle.sin()));
        }
    }

    let mut faces = Vec::with_capacity((segments * levels) as usize);
    for level in 0..levels {
        for segment in 0..segments {
            let next = (segment + 1) % segments;
            let a = level * segments + segment;
            let b = level * segments + next;
            let c = (level + 1) * segments + next;
            let d = (level + 1) * segments + segment;
            faces.push([a, d, c, b]);
        }
    }

    HalfEdgeMesh::from_polygons(&positions, &faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::half_edge::VertexId;

    #[test]
    fn test_grid_layout() {
        let mesh = grid(3, 3, 1.0).unwrap();

        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.vertex(VertexId(4)).unwrap().position, Vec3::ZERO);
        assert_eq!(
            mesh.vertex(VertexId(0)).unwrap().position,
            Vec3::new(-1.0, 0.0, -1.0)
        );
    }

    #[test]
    fn test_grid_too_small() {
        assert!(grid(1, 5, 1.0).is_err());
    }

    #[test]
    fn test_cylinder_rings() {
        let mesh = cylinder(6, 2, 1.0, 2.0).unwrap();

        assert_eq!(mesh.vertex_count(), 18);
        assert_eq!(mesh.face_count(), 12);
        // Bottom and top loops are boundaries, the middle loop is interior
        assert_eq!(mesh.ring(VertexId(0)).unwrap().len(), 3);
        assert_eq!(mesh.ring(VertexId(6)).unwrap().len(), 4);
        assert!(mesh.is_boundary_vertex(VertexId(0)));
        assert!(!mesh.is_boundary_vertex(VertexId(6)));
    }
}

//! Small reference meshes shared by the unit tests.

use glam::Vec3;
use mush_topology::{primitives, HalfEdgeMesh, VertexId};

/// Unit-spaced grid with a deterministic, non-planar jitter.
pub fn jittered_grid(cols: u32, rows: u32) -> HalfEdgeMesh {
    let mut mesh = primitives::grid(cols, rows, 1.0).unwrap();
    let positions = mesh.positions();
    for (i, p) in positions.iter().enumerate() {
        let t = i as f32;
        let jitter = Vec3::new((t * 1.7).sin() * 0.2, (t * 0.9).cos() * 0.3, (t * 2.3).sin() * 0.15);
        mesh.set_vertex_position(VertexId(i as u32), *p + jitter);
    }
    mesh
}

/// Closed cube of side 2 around the origin, outward facing quads.
pub fn cube() -> HalfEdgeMesh {
    let positions = [
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
    ];
    let faces = [
        [0, 1, 5, 4],
        [3, 7, 6, 2],
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 4, 7, 3],
        [1, 2, 6, 5],
    ];
    HalfEdgeMesh::from_polygons(&positions, &faces).unwrap()
}

/// Open triangle fan: vertex 0 at the origin, `rim` vertices on a unit
/// half circle raised slightly toward the middle.
pub fn fan(rim: u32) -> HalfEdgeMesh {
    let mut positions = vec![Vec3::ZERO];
    for i in 0..rim {
        let angle = i as f32 / (rim - 1) as f32 * std::f32::consts::PI;
        positions.push(Vec3::new(angle.cos(), angle.sin() * 0.3, angle.sin()));
    }
    let indices: Vec<u32> = (1..rim).flat_map(|i| [0, i, i + 1]).collect();
    HalfEdgeMesh::from_triangles(&positions, &indices).unwrap()
}

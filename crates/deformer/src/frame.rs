//! Local orthonormal frames spanned by a vertex and two ring neighbors.

use glam::{Mat3, Vec3};

/// Lengths and cross products below this are treated as degenerate.
pub const FRAME_EPSILON: f32 = 1e-6;

/// Orthonormal basis built from a center vertex and one consecutive pair of
/// its ring neighbors.
///
/// Columns are tangent (toward the first neighbor), bitangent and normal.
/// Being orthonormal, the inverse is the transpose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    basis: Mat3,
}

impl TangentFrame {
    /// Build the frame at `center` from neighbors `first` and `second`.
    ///
    /// Returns `None` when either edge is shorter than [`FRAME_EPSILON`] or
    /// the edges are (anti)parallel.
    pub fn new(center: Vec3, first: Vec3, second: Vec3) -> Option<Self> {
        let tangent = unit(first - center)?;
        let toward_second = unit(second - center)?;
        let normal = unit(tangent.cross(toward_second))?;
        let bitangent = normal.cross(tangent).normalize_or_zero();

        Some(Self {
            basis: Mat3::from_cols(tangent, bitangent, normal),
        })
    }

    pub fn tangent(&self) -> Vec3 {
        self.basis.x_axis
    }

    pub fn bitangent(&self) -> Vec3 {
        self.basis.y_axis
    }

    pub fn normal(&self) -> Vec3 {
        self.basis.z_axis
    }

    pub fn matrix(&self) -> Mat3 {
        self.basis
    }

    /// Express a world-space vector in this frame.
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.basis.transpose() * world
    }

    /// Map a frame-local vector back to world space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.basis * local
    }
}

fn unit(v: Vec3) -> Option<Vec3> {
    let length = v.length();
    (length >= FRAME_EPSILON).then(|| v / length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_axis_aligned_frame() {
        let frame = TangentFrame::new(Vec3::ZERO, Vec3::X * 2.0, Vec3::Y * 3.0).unwrap();

        assert_close(frame.tangent(), Vec3::X);
        assert_close(frame.bitangent(), Vec3::Y);
        assert_close(frame.normal(), Vec3::Z);
    }

    #[test]
    fn test_second_neighbor_only_sets_the_plane() {
        let frame = TangentFrame::new(Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0)).unwrap();

        assert_close(frame.bitangent(), Vec3::Y);
        assert!(frame.matrix().determinant() > 0.999);
    }

    #[test]
    fn test_local_world_round_trip() {
        let frame = TangentFrame::new(
            Vec3::new(0.3, -1.0, 2.0),
            Vec3::new(1.1, 0.2, 2.5),
            Vec3::new(-0.4, 0.1, 3.0),
        )
        .unwrap();
        let world = Vec3::new(0.7, -2.0, 0.25);

        assert_close(frame.to_world(frame.to_local(world)), world);
        assert!((frame.to_local(world).length() - world.length()).abs() < 1e-5);
    }

    #[test]
    fn test_local_coordinates_follow_rotation() {
        let center = Vec3::new(0.5, 0.0, 0.0);
        let first = Vec3::new(1.5, 0.2, 0.0);
        let second = Vec3::new(0.4, 1.0, 0.3);
        let offset = Vec3::new(0.1, 0.2, 0.9);

        let rest = TangentFrame::new(center, first, second).unwrap();
        let local = rest.to_local(offset);

        let rotation = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), 1.1);
        let posed = TangentFrame::new(rotation * center, rotation * first, rotation * second).unwrap();

        assert_close(posed.to_world(local), rotation * offset);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(TangentFrame::new(Vec3::ZERO, Vec3::ZERO, Vec3::Y).is_none());
        assert!(TangentFrame::new(Vec3::ZERO, Vec3::X, Vec3::splat(1e-8)).is_none());
        assert!(TangentFrame::new(Vec3::ZERO, Vec3::X, Vec3::X * 3.0).is_none());
        assert!(TangentFrame::new(Vec3::ZERO, Vec3::X, Vec3::NEG_X).is_none());
    }
}

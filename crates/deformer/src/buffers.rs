//! Flat `f32` position buffers, as hosts usually hand them over.

use glam::Vec3;

use crate::error::{DeformError, DeformResult};

/// View a flat `[x, y, z, x, y, z, ..]` buffer as positions without copying.
pub fn positions_from_flat(flat: &[f32]) -> DeformResult<&[Vec3]> {
    bytemuck::try_cast_slice(flat).map_err(|_| DeformError::MalformedBuffer { len: flat.len() })
}

/// View positions as a flat `f32` buffer without copying.
pub fn positions_to_flat(positions: &[Vec3]) -> &[f32] {
    bytemuck::cast_slice(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_views() {
        let flat = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let positions = positions_from_flat(&flat).unwrap();

        assert_eq!(positions, &[Vec3::new(0.0, 1.0, 2.0), Vec3::new(3.0, 4.0, 5.0)]);
        assert_eq!(positions_to_flat(positions), &flat);
    }

    #[test]
    fn test_partial_vertex_rejected() {
        let err = positions_from_flat(&[0.0; 4]).unwrap_err();
        assert!(matches!(err, DeformError::MalformedBuffer { len: 4 }));
    }
}

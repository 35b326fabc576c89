//! Iterative neighbor-average smoothing.
//!
//! Each iteration reads only the previous iteration's buffer (Jacobi), so the
//! per-vertex work of one iteration runs in parallel and the result does not
//! depend on vertex order.

use glam::Vec3;
use mush_config::RelaxParameters;
use mush_topology::VertexRing;
use rayon::prelude::*;

use crate::error::{DeformError, DeformResult};

/// Smooth `source` over `rings`, returning a new buffer.
///
/// Per iteration every vertex moves `amount` of the way toward the mean of
/// its ring. Vertices with an empty ring stay put. Zero iterations return a
/// copy of the input.
pub fn relax<R>(source: &[Vec3], rings: &[R], params: RelaxParameters) -> DeformResult<Vec<Vec3>>
where
    R: AsRef<VertexRing> + Sync,
{
    if source.len() != rings.len() {
        return Err(DeformError::VertexCountMismatch {
            expected: rings.len(),
            actual: source.len(),
        });
    }

    let mut current = source.to_vec();
    for _ in 0..params.iterations() {
        current = relax_step(&current, rings, params.amount());
    }
    Ok(current)
}

fn relax_step<R>(current: &[Vec3], rings: &[R], amount: f32) -> Vec<Vec3>
where
    R: AsRef<VertexRing> + Sync,
{
    current
        .par_iter()
        .zip(rings.par_iter())
        .map(|(&position, ring)| match ring_mean(current, ring.as_ref()) {
            Some(mean) => position + (mean - position) * amount,
            None => position,
        })
        .collect()
}

/// Mean position of a ring, `None` for an empty ring.
fn ring_mean(positions: &[Vec3], ring: &VertexRing) -> Option<Vec3> {
    let mut sum = Vec3::ZERO;
    let mut count = 0u32;
    for &neighbor in ring.neighbors() {
        if let Some(&p) = positions.get(neighbor as usize) {
            sum += p;
            count += 1;
        }
    }
    (count > 0).then(|| sum / count as f32)
}

/// Degree-weighted squared distance of every vertex from its ring mean.
///
/// Smoothing with `amount` in 0-1 never increases this quantity, which
/// makes it a convenient convergence measure.
pub fn smoothness_energy<R>(positions: &[Vec3], rings: &[R]) -> f32
where
    R: AsRef<VertexRing> + Sync,
{
    positions
        .par_iter()
        .zip(rings.par_iter())
        .map(|(&position, ring)| {
            let ring = ring.as_ref();
            ring_mean(positions, ring)
                .map(|mean| ring.len() as f32 * (mean - position).length_squared())
                .unwrap_or(0.0)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn path() -> Vec<VertexRing> {
        vec![
            VertexRing::new(vec![1]),
            VertexRing::new(vec![0, 2]),
            VertexRing::new(vec![1]),
        ]
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let mesh = fixtures::jittered_grid(4, 4);
        let out = relax(&mesh.positions(), mesh.rings(), RelaxParameters::new(0, 0.5)).unwrap();
        assert_eq!(out, mesh.positions());
    }

    #[test]
    fn test_step_reads_previous_buffer_only() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::X * 4.0];
        let out = relax(&positions, &path(), RelaxParameters::new(1, 1.0)).unwrap();

        // Gauss-Seidel would move the middle vertex to 2.5
        assert_eq!(out, vec![Vec3::X, Vec3::X * 2.0, Vec3::X]);
    }

    #[test]
    fn test_amount_blends_toward_mean() {
        let positions = [Vec3::ZERO, Vec3::Y * 2.0, Vec3::ZERO];
        let out = relax(&positions, &path(), RelaxParameters::new(1, 0.25)).unwrap();

        assert_eq!(out[1], Vec3::Y * 1.5);
        assert_eq!(out[0], Vec3::Y * 0.5);
    }

    #[test]
    fn test_isolated_vertex_stays_put() {
        let rings = vec![VertexRing::default(), VertexRing::new(vec![2]), VertexRing::new(vec![1])];
        let positions = [Vec3::splat(3.0), Vec3::ZERO, Vec3::X];
        let out = relax(&positions, &rings, RelaxParameters::new(10, 0.5)).unwrap();

        assert_eq!(out[0], Vec3::splat(3.0));
    }

    #[test]
    fn test_input_not_mutated() {
        let mesh = fixtures::cube();
        let before = mesh.positions();
        let _ = relax(&before, mesh.rings(), RelaxParameters::new(3, 0.5)).unwrap();
        assert_eq!(before, mesh.positions());
    }

    #[test]
    fn test_length_mismatch() {
        let err = relax(&[Vec3::ZERO], &path(), RelaxParameters::new(1, 0.5)).unwrap_err();
        assert!(matches!(
            err,
            DeformError::VertexCountMismatch { expected: 3, actual: 1 }
        ));
    }

    #[test]
    fn test_energy_measures_distance_from_ring_mean() {
        let positions = [Vec3::NEG_X, Vec3::ZERO, Vec3::X];
        assert_eq!(smoothness_energy(&positions, &path()), 2.0);

        let rings = vec![VertexRing::default(), VertexRing::new(vec![0, 2]), VertexRing::default()];
        assert_eq!(smoothness_energy(&positions, &rings), 0.0);
    }
}

//! Evaluation-time detail restoration.

use glam::Vec3;
use mush_config::EvaluationParameters;
use rayon::prelude::*;

use crate::bind::{pair_frame, BindState, BoundVertex};
use crate::error::{DeformError, DeformResult};
use crate::frame::FRAME_EPSILON;
use crate::relax::relax;
use crate::weights::VertexWeights;

/// Deform `live` positions with a bind.
///
/// Smooths the live positions with the bind's relax parameters, re-applies
/// each vertex's stored detail in the live frames, then blends from the
/// live position toward that result by `weight * envelope`.
pub fn apply_deltas(
    bind: &BindState,
    live: &[Vec3],
    weights: &VertexWeights,
    params: &EvaluationParameters,
) -> DeformResult<Vec<Vec3>> {
    if live.len() != bind.vertex_count() {
        return Err(DeformError::VertexCountMismatch {
            expected: bind.vertex_count(),
            actual: live.len(),
        });
    }

    if params.envelope() < FRAME_EPSILON {
        return Ok(live.to_vec());
    }

    let relax_params = bind.relax_parameters();
    let smoothed = relax(live, bind.vertices(), relax_params)?;
    if relax_params.iterations() == 0 {
        return Ok(smoothed);
    }

    let detail_scale = params.delta_strength() * params.global_scale();
    let restore = params.delta_strength() >= FRAME_EPSILON;

    let output = live
        .par_iter()
        .zip(smoothed.par_iter())
        .zip(bind.vertices().par_iter())
        .enumerate()
        .map(|(index, ((&position, &center), bound))| {
            let candidate = if restore {
                center + restored_direction(bound, center, &smoothed) * (bound.delta_length() * detail_scale)
            } else {
                center
            };
            position + (candidate - position) * (weights.get(index) * params.envelope())
        })
        .collect();

    Ok(output)
}

/// Mean of a vertex's offsets decoded in the live frames, normalized.
///
/// Zero when no pair yields a frame.
fn restored_direction(bound: &BoundVertex, center: Vec3, smoothed: &[Vec3]) -> Vec3 {
    let mut sum = Vec3::ZERO;
    let mut count = 0u32;
    for ((a, b), &offset) in bound.ring().pairs().zip(bound.offsets()) {
        if let Some(frame) = pair_frame(center, a, b, smoothed) {
            sum += frame.to_world(offset);
            count += 1;
        }
    }
    if count == 0 {
        return Vec3::ZERO;
    }
    (sum / count as f32).normalize_or_zero()
}

//! Bind-time detail encoding.
//!
//! A bind smooths the reference positions and stores, per vertex, the
//! offset that smoothing removed. The offset is kept once per consecutive
//! ring pair, expressed in that pair's tangent frame, so it can be replayed
//! on a posed mesh whose frames have rotated.

use glam::Vec3;
use mush_config::RelaxParameters;
use mush_topology::{bind_positions, bind_topology, ReferenceSurface, TopologyKey, VertexRing};
use rayon::prelude::*;
use tracing::debug;

use crate::error::DeformResult;
use crate::frame::TangentFrame;
use crate::relax::relax;

/// Everything the deformer remembers about one vertex between evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundVertex {
    ring: VertexRing,
    offsets: Vec<Vec3>,
    delta_length: f32,
}

impl BoundVertex {
    pub fn ring(&self) -> &VertexRing {
        &self.ring
    }

    /// Frame-local offsets, one per consecutive ring pair. Pairs whose frame
    /// was degenerate at bind time hold zero.
    pub fn offsets(&self) -> &[Vec3] {
        &self.offsets
    }

    /// Distance between the bind position and its smoothed counterpart.
    pub fn delta_length(&self) -> f32 {
        self.delta_length
    }
}

impl AsRef<VertexRing> for BoundVertex {
    fn as_ref(&self) -> &VertexRing {
        &self.ring
    }
}

/// Summary counts of a bind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindStats {
    pub vertices: usize,
    pub pairs: usize,
    /// Pairs that produced no frame and carry a zero offset
    pub degenerate_pairs: usize,
    /// Vertices with an empty ring
    pub isolated_vertices: usize,
}

/// The complete result of one bind.
///
/// Immutable once built; a rebind produces a new state rather than
/// updating this one.
#[derive(Debug, Clone)]
pub struct BindState {
    generation: u64,
    relax: RelaxParameters,
    topology_key: TopologyKey,
    vertices: Vec<BoundVertex>,
    stats: BindStats,
}

impl BindState {
    /// Bind against a reference surface.
    pub fn build<S: ReferenceSurface + ?Sized>(
        reference: &S,
        relax: RelaxParameters,
        generation: u64,
    ) -> DeformResult<Self> {
        let rings = bind_topology(reference)?;
        let positions = bind_positions(reference)?;
        Self::from_parts(&positions, rings, relax, reference.topology_key(), generation)
    }

    /// Bind from already-extracted positions and rings. Rings are expected to
    /// be checked; neighbors out of range are ignored.
    pub(crate) fn from_parts(
        positions: &[Vec3],
        rings: Vec<VertexRing>,
        relax_params: RelaxParameters,
        topology_key: TopologyKey,
        generation: u64,
    ) -> DeformResult<Self> {
        let smoothed = relax(positions, &rings, relax_params)?;

        let encoded: Vec<(BoundVertex, usize)> = rings
            .into_par_iter()
            .enumerate()
            .map(|(vertex, ring)| encode_vertex(ring, positions[vertex], smoothed[vertex], &smoothed))
            .collect();

        let mut stats = BindStats {
            vertices: encoded.len(),
            ..BindStats::default()
        };
        let vertices = encoded
            .into_iter()
            .map(|(bound, degenerate)| {
                stats.pairs += bound.offsets.len();
                stats.degenerate_pairs += degenerate;
                if bound.ring.is_empty() {
                    stats.isolated_vertices += 1;
                }
                bound
            })
            .collect();

        debug!(
            "bind: generation {} vertices={} pairs={} degenerate_pairs={} isolated={}",
            generation, stats.vertices, stats.pairs, stats.degenerate_pairs, stats.isolated_vertices
        );

        Ok(Self {
            generation,
            relax: relax_params,
            topology_key,
            vertices,
            stats,
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Relax parameters the bind was computed with.
    pub fn relax_parameters(&self) -> RelaxParameters {
        self.relax
    }

    pub fn topology_key(&self) -> TopologyKey {
        self.topology_key
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[BoundVertex] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Option<&BoundVertex> {
        self.vertices.get(index)
    }

    pub fn stats(&self) -> BindStats {
        self.stats
    }
}

/// Encode one vertex, returning the record and its degenerate pair count.
fn encode_vertex(ring: VertexRing, rest: Vec3, center: Vec3, smoothed: &[Vec3]) -> (BoundVertex, usize) {
    let delta = rest - center;
    let mut degenerate = 0;

    let offsets: Vec<Vec3> = ring
        .pairs()
        .map(|(a, b)| match pair_frame(center, a, b, smoothed) {
            Some(frame) => frame.to_local(delta),
            None => {
                degenerate += 1;
                Vec3::ZERO
            }
        })
        .collect();

    let bound = BoundVertex {
        ring,
        offsets,
        delta_length: delta.length(),
    };
    (bound, degenerate)
}

/// Frame of one ring pair over `positions`.
pub(crate) fn pair_frame(center: Vec3, a: u32, b: u32, positions: &[Vec3]) -> Option<TangentFrame> {
    let first = *positions.get(a as usize)?;
    let second = *positions.get(b as usize)?;
    TangentFrame::new(center, first, second)
}

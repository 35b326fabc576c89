//! The deformer instance and its bind lifecycle.

use std::sync::Arc;

use glam::Vec3;
use mush_config::{DeformerSettings, RelaxParameters};
use mush_topology::ReferenceSurface;
use tracing::{debug, trace};

use crate::apply::apply_deltas;
use crate::bind::BindState;
use crate::buffers::{positions_from_flat, positions_to_flat};
use crate::error::DeformResult;
use crate::weights::VertexWeights;

/// A delta mush deformer.
///
/// Starts unbound. The first evaluation binds against the reference
/// surface; later evaluations reuse that bind until the relax parameters or
/// the reference topology change, or a rebind is requested. A rebind builds
/// a complete new [`BindState`] and only then replaces the old one, so a
/// failed bind leaves the previous state in place and snapshots handed out
/// earlier stay valid.
#[derive(Debug, Default)]
pub struct DeltaMush {
    bound: Option<Arc<BindState>>,
    generation: u64,
}

impl DeltaMush {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a bind is currently held.
    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Generation of the latest successful bind, 0 before the first.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Shared handle to the current bind.
    pub fn bind_snapshot(&self) -> Option<Arc<BindState>> {
        self.bound.clone()
    }

    /// Drop the current bind; the next evaluation binds again.
    pub fn request_rebind(&mut self) {
        if self.bound.take().is_some() {
            debug!("request_rebind: generation {} released", self.generation);
        }
    }

    /// Bind against `reference` now, replacing any previous bind.
    pub fn bind<S: ReferenceSurface + ?Sized>(
        &mut self,
        reference: &S,
        relax: RelaxParameters,
    ) -> DeformResult<Arc<BindState>> {
        let state = Arc::new(BindState::build(reference, relax, self.generation + 1)?);
        self.generation = state.generation();
        self.bound = Some(Arc::clone(&state));
        Ok(state)
    }

    /// Deform `live` positions.
    ///
    /// Settings are validated first, then the bind is refreshed if needed,
    /// then the live buffer is checked against the bound vertex count. On any
    /// error no output is produced.
    pub fn evaluate<S: ReferenceSurface + ?Sized>(
        &mut self,
        reference: &S,
        live: &[Vec3],
        weights: &VertexWeights,
        settings: &DeformerSettings,
    ) -> DeformResult<Vec<Vec3>> {
        let params = settings.validate()?;
        let state = self.ensure_bound(reference, params.relax, settings.rebind)?;
        let output = apply_deltas(&state, live, weights, &params.evaluation)?;

        trace!(
            "evaluate: {} vertices, generation {}, envelope {}",
            output.len(),
            state.generation(),
            params.evaluation.envelope()
        );
        Ok(output)
    }

    /// [`evaluate`](Self::evaluate) over flat `[x, y, z, ..]` buffers.
    pub fn evaluate_flat<S: ReferenceSurface + ?Sized>(
        &mut self,
        reference: &S,
        live: &[f32],
        weights: &VertexWeights,
        settings: &DeformerSettings,
    ) -> DeformResult<Vec<f32>> {
        let live = positions_from_flat(live)?;
        let output = self.evaluate(reference, live, weights, settings)?;
        Ok(positions_to_flat(&output).to_vec())
    }

    fn ensure_bound<S: ReferenceSurface + ?Sized>(
        &mut self,
        reference: &S,
        relax: RelaxParameters,
        force: bool,
    ) -> DeformResult<Arc<BindState>> {
        match &self.bound {
            None => debug!("ensure_bound: unbound, binding"),
            Some(_) if force => debug!("ensure_bound: rebind forced by settings"),
            Some(state) if state.relax_parameters() != relax => {
                debug!(
                    "ensure_bound: relax parameters changed {:?} -> {:?}",
                    state.relax_parameters(),
                    relax
                );
            }
            Some(state) if state.topology_key() != reference.topology_key() => {
                debug!("ensure_bound: reference topology changed");
            }
            Some(state) => return Ok(Arc::clone(state)),
        }
        self.bind(reference, relax)
    }
}

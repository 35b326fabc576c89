//! Delta mush deformer.
//!
//! Smooths a deforming mesh while keeping the surface detail of its bind
//! pose. A bind measures, per vertex, how far smoothing moves the reference
//! mesh and stores that offset in local tangent frames; evaluation smooths
//! the live mesh and adds the offset back in the live frames.
//!
//! - [`relax`] - Jacobi neighbor-average smoothing
//! - [`frame`] - Tangent frames from ring neighbor pairs
//! - [`bind`] - Bind-time encoding into a [`BindState`]
//! - [`apply`] - Evaluation-time decoding and blending
//! - [`deformer`] - The [`DeltaMush`] instance and its bind lifecycle

pub mod apply;
pub mod bind;
pub mod buffers;
pub mod deformer;
pub mod error;
pub mod frame;
pub mod relax;
pub mod weights;

#[cfg(test)]
mod fixtures;

pub use apply::apply_deltas;
pub use bind::{BindState, BindStats, BoundVertex};
pub use deformer::DeltaMush;
pub use error::{DeformError, DeformResult};
pub use frame::{TangentFrame, FRAME_EPSILON};
pub use relax::{relax, smoothness_energy};
pub use weights::VertexWeights;

pub use mush_config::{ConfigError, DeformerSettings, EvaluationParameters, RelaxParameters};
pub use mush_topology::{HalfEdgeMesh, ReferenceSurface, RingMesh, TopologyError, TopologyKey, VertexRing};

//! Reference mesh topology for the delta mush deformer.
//!
//! This crate turns a bind-pose reference mesh into the static adjacency the
//! deformer works from:
//! - [`half_edge`] - Half-edge mesh built from triangle or polygon faces
//! - [`ring`] - Ordered neighbor rings and the ring-list surface
//! - [`surface`] - The [`ReferenceSurface`] query trait and topology keys
//! - [`binder`] - Ring and position extraction from any reference surface
//! - [`primitives`] - Procedural grids and cylinders

pub mod binder;
pub mod error;
pub mod half_edge;
pub mod primitives;
pub mod ring;
pub mod surface;

pub use binder::{bind_positions, bind_topology};
pub use error::{TopologyError, TopologyResult};
pub use half_edge::{HalfEdgeMesh, ManifoldError, VertexId};
pub use ring::{RingMesh, VertexRing};
pub use surface::{ReferenceSurface, TopologyKey};

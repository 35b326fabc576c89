//! Shared configuration for the delta mush deformer
//!
//! Settings arrive from the host as loosely typed values; `validate` turns
//! them into the parameter types the deformer runs on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default global strength of the deformer
pub const DEFAULT_ENVELOPE: f32 = 1.0;

/// Default number of smoothing iterations (0 = deformer passes positions through)
pub const DEFAULT_ITERATIONS: i32 = 0;

/// Default per-iteration blend toward the neighbor average
pub const DEFAULT_AMOUNT: f32 = 0.5;

/// Default blend between the pure smoothed result and the detail-restored one
pub const DEFAULT_APPLY_DELTA: f32 = 1.0;

/// Default multiplier on the restored detail magnitude
pub const DEFAULT_GLOBAL_SCALE: f32 = 1.0;

/// Smallest accepted positive global scale; smaller positive values are raised to it
pub const MIN_GLOBAL_SCALE: f32 = 0.0001;

/// Errors raised while validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("iteration count must be non-negative, got {0}")]
    NegativeIterations(i32),
    #[error("global scale must be greater than zero, got {0}")]
    NonPositiveGlobalScale(f32),
    #[error("weight of vertex {vertex} must be finite, got {value}")]
    NonFiniteWeight { vertex: usize, value: f32 },
    #[error("invalid settings document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Deformer settings as supplied by the host, before validation.
///
/// Every field is optional in serialized form and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeformerSettings {
    /// Global strength of the whole effect, 0-1
    pub envelope: f32,
    /// Number of smoothing iterations
    pub iterations: i32,
    /// Per-iteration blend toward the neighbor average, 0-1
    pub amount: f32,
    /// Blend between pure smoothing (0) and full detail restoration (1)
    pub apply_delta: f32,
    /// Uniform multiplier on the restored detail magnitude, > 0
    pub global_scale: f32,
    /// Force a rebind on every evaluation while set
    pub rebind: bool,
}

impl Default for DeformerSettings {
    fn default() -> Self {
        Self {
            envelope: DEFAULT_ENVELOPE,
            iterations: DEFAULT_ITERATIONS,
            amount: DEFAULT_AMOUNT,
            apply_delta: DEFAULT_APPLY_DELTA,
            global_scale: DEFAULT_GLOBAL_SCALE,
            rebind: false,
        }
    }
}

impl DeformerSettings {
    /// Create settings with the given smoothing and defaults elsewhere
    pub fn new(iterations: i32, amount: f32) -> Self {
        Self {
            iterations,
            amount,
            ..Self::default()
        }
    }

    /// Parse settings from a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize settings to a JSON document
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Validate and normalize the settings.
    ///
    /// Non-finite values, negative iteration counts and non-positive global
    /// scales are rejected. Blend factors outside 0-1 are clamped.
    pub fn validate(&self) -> Result<DeformerParameters, ConfigError> {
        let envelope = finite("envelope", self.envelope)?;
        let amount = finite("amount", self.amount)?;
        let apply_delta = finite("apply_delta", self.apply_delta)?;
        let global_scale = finite("global_scale", self.global_scale)?;

        if self.iterations < 0 {
            return Err(ConfigError::NegativeIterations(self.iterations));
        }

        Ok(DeformerParameters {
            relax: RelaxParameters::new(self.iterations as u32, clamp_unit("amount", amount)),
            evaluation: EvaluationParameters::new(envelope, apply_delta, global_scale)?,
        })
    }
}

/// Validated parameters for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeformerParameters {
    pub relax: RelaxParameters,
    pub evaluation: EvaluationParameters,
}

/// Smoothing configuration.
///
/// Compared by value between evaluations: any change invalidates a bind.
/// Only built through [`RelaxParameters::new`], so `amount` is always in 0-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxParameters {
    iterations: u32,
    amount: f32,
}

impl Default for RelaxParameters {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS as u32,
            amount: DEFAULT_AMOUNT,
        }
    }
}

impl RelaxParameters {
    /// Create relax parameters; `amount` is clamped to 0-1 and NaN becomes 0.
    pub fn new(iterations: u32, amount: f32) -> Self {
        let amount = if amount.is_nan() { 0.0 } else { amount.clamp(0.0, 1.0) };
        Self { iterations, amount }
    }

    /// Number of Jacobi smoothing iterations.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Per-iteration blend toward the neighbor average, 0-1.
    pub fn amount(&self) -> f32 {
        self.amount
    }
}

/// Per-evaluation blend configuration.
///
/// Fields are private: every value goes through [`EvaluationParameters::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationParameters {
    envelope: f32,
    delta_strength: f32,
    global_scale: f32,
}

impl Default for EvaluationParameters {
    fn default() -> Self {
        Self {
            envelope: DEFAULT_ENVELOPE,
            delta_strength: DEFAULT_APPLY_DELTA,
            global_scale: DEFAULT_GLOBAL_SCALE,
        }
    }
}

impl EvaluationParameters {
    /// Create evaluation parameters, clamping the blend factors and
    /// rejecting non-finite values and non-positive scales.
    pub fn new(envelope: f32, delta_strength: f32, global_scale: f32) -> Result<Self, ConfigError> {
        let envelope = finite("envelope", envelope)?;
        let delta_strength = finite("apply_delta", delta_strength)?;
        let global_scale = finite("global_scale", global_scale)?;

        if global_scale <= 0.0 {
            return Err(ConfigError::NonPositiveGlobalScale(global_scale));
        }
        let global_scale = if global_scale < MIN_GLOBAL_SCALE {
            tracing::warn!(
                "global_scale {} below minimum, raised to {}",
                global_scale,
                MIN_GLOBAL_SCALE
            );
            MIN_GLOBAL_SCALE
        } else {
            global_scale
        };

        Ok(Self {
            envelope: clamp_unit("envelope", envelope),
            delta_strength: clamp_unit("apply_delta", delta_strength),
            global_scale,
        })
    }

    /// Global strength, 0-1.
    pub fn envelope(&self) -> f32 {
        self.envelope
    }

    /// Blend toward the detail-restored position, 0-1.
    pub fn delta_strength(&self) -> f32 {
        self.delta_strength
    }

    /// Multiplier on the restored detail magnitude, at least [`MIN_GLOBAL_SCALE`].
    pub fn global_scale(&self) -> f32 {
        self.global_scale
    }
}

fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn clamp_unit(field: &'static str, value: f32) -> f32 {
    let clamped = value.clamp(0.0, 1.0);
    if clamped != value {
        tracing::warn!("{} {} outside 0-1, clamped to {}", field, value, clamped);
    }
    clamped
}

//! Per-vertex deformer weights.

use std::collections::HashMap;

use mush_config::ConfigError;

/// How strongly the deformer acts on each vertex, 0-1.
///
/// Vertices without an explicit value get full weight. Values can only be
/// supplied through the constructors, which reject non-finite weights and
/// clamp the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexWeights(Storage);

#[derive(Debug, Clone, PartialEq)]
enum Storage {
    Uniform(f32),
    Dense(Vec<f32>),
    Sparse(HashMap<usize, f32>),
}

impl Default for VertexWeights {
    fn default() -> Self {
        Self(Storage::Uniform(1.0))
    }
}

impl VertexWeights {
    /// The same weight for every vertex.
    pub fn uniform(weight: f32) -> Result<Self, ConfigError> {
        let mut clamped = 0;
        let weight = sanitize(0, weight, &mut clamped)?;
        report_clamped(clamped);
        Ok(Self(Storage::Uniform(weight)))
    }

    /// One weight per vertex in index order; vertices past the end get 1.0.
    pub fn dense(weights: Vec<f32>) -> Result<Self, ConfigError> {
        let mut clamped = 0;
        let weights = weights
            .into_iter()
            .enumerate()
            .map(|(vertex, w)| sanitize(vertex, w, &mut clamped))
            .collect::<Result<Vec<_>, _>>()?;
        report_clamped(clamped);
        Ok(Self(Storage::Dense(weights)))
    }

    /// Weights for selected vertices; all others get 1.0.
    pub fn sparse<I>(weights: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (usize, f32)>,
    {
        let mut clamped = 0;
        let weights = weights
            .into_iter()
            .map(|(vertex, w)| Ok((vertex, sanitize(vertex, w, &mut clamped)?)))
            .collect::<Result<HashMap<_, _>, ConfigError>>()?;
        report_clamped(clamped);
        Ok(Self(Storage::Sparse(weights)))
    }

    /// Weight of one vertex.
    pub fn get(&self, vertex: usize) -> f32 {
        match &self.0 {
            Storage::Uniform(w) => *w,
            Storage::Dense(weights) => weights.get(vertex).copied().unwrap_or(1.0),
            Storage::Sparse(weights) => weights.get(&vertex).copied().unwrap_or(1.0),
        }
    }
}

fn sanitize(vertex: usize, weight: f32, clamped: &mut usize) -> Result<f32, ConfigError> {
    if !weight.is_finite() {
        return Err(ConfigError::NonFiniteWeight { vertex, value: weight });
    }
    let value = weight.clamp(0.0, 1.0);
    if value != weight {
        *clamped += 1;
    }
    Ok(value)
}

fn report_clamped(clamped: usize) {
    if clamped > 0 {
        tracing::warn!("vertex weights: clamped {} values into 0-1", clamped);
    }
}

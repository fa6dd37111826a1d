//! Model identity and metadata.
//!
//! A model is addressed by its `(provider, model)` pair. Metadata carries the
//! externally curated estimates the router scores against.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{Error, Result};

/// Unique key of an invocable backend.
///
/// Ordering is lexicographic by provider, then model; routing relies on it
/// for deterministic tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModelKey {
    /// Provider identifier, e.g. `openai`
    pub provider: String,
    /// Model identifier within the provider
    pub model: String,
}

impl ModelKey {
    /// Creates a key from a provider and model name.
    pub fn new<P: Into<String>, M: Into<String>>(provider: P, model: M) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }
}

impl Display for ModelKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.provider, self.model)
    }
}

/// Metadata describing one invocable backend model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Provider identifier
    pub provider: String,
    /// Model identifier, unique within the provider
    pub model: String,
    /// Curated benchmark proxy in `[0, 1]`
    pub quality_score: f64,
    /// Input cost per one million tokens
    pub cost_input_per_1m: f64,
    /// Output cost per one million tokens
    pub cost_output_per_1m: f64,
    /// Estimated round-trip latency in milliseconds
    pub avg_latency_ms: f64,
    /// Maximum input tokens
    pub context_window: u64,
    /// Open-ended capability tags such as `vision` or `tools`
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
    /// Whether the backend performs extended chain-of-thought
    #[serde(default)]
    pub reasoning_model: bool,
    /// Whether the backend can stream responses, `true` when omitted
    #[serde(default = "default_supports_streaming")]
    pub supports_streaming: bool,
}

const fn default_supports_streaming() -> bool {
    true
}

impl ModelMetadata {
    /// Creates metadata with the required numeric fields and no capabilities.
    pub fn new<P: Into<String>, M: Into<String>>(
        provider: P,
        model: M,
        quality_score: f64,
        cost_input_per_1m: f64,
        cost_output_per_1m: f64,
        avg_latency_ms: f64,
        context_window: u64,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            quality_score,
            cost_input_per_1m,
            cost_output_per_1m,
            avg_latency_ms,
            context_window,
            capabilities: BTreeSet::new(),
            reasoning_model: false,
            supports_streaming: default_supports_streaming(),
        }
    }

    /// Adds a capability tag.
    #[must_use]
    pub fn with_capability<T: Into<String>>(mut self, capability: T) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    /// Marks the model as a reasoning model.
    #[must_use]
    pub fn with_reasoning(mut self, reasoning_model: bool) -> Self {
        self.reasoning_model = reasoning_model;
        self
    }

    /// Sets streaming support.
    #[must_use]
    pub fn with_streaming(mut self, supports_streaming: bool) -> Self {
        self.supports_streaming = supports_streaming;
        self
    }

    /// Returns the registry key of this model.
    pub fn key(&self) -> ModelKey {
        ModelKey::new(self.provider.clone(), self.model.clone())
    }

    /// Whether the model advertises the given capability.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    /// Mean of input and output cost per one million tokens.
    pub fn mean_cost_per_1m(&self) -> f64 {
        (self.cost_input_per_1m + self.cost_output_per_1m) / 2.0
    }

    /// Mean per-token cost expressed per one thousand tokens.
    pub fn mean_cost_per_1k(&self) -> f64 {
        self.mean_cost_per_1m() / 1000.0
    }

    /// Checks the metadata invariants.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let key = self.key();
        if self.provider.trim().is_empty() || self.model.trim().is_empty() {
            return Err(Error::Configuration(format!(
                "model entry '{key}' has an empty provider or model name"
            )));
        }
        if !self.quality_score.is_finite() || !(0.0..=1.0).contains(&self.quality_score) {
            return Err(Error::Configuration(format!(
                "{key}: quality_score must be within [0, 1], got {}",
                self.quality_score
            )));
        }
        for (field, value) in [
            ("cost_input_per_1m", self.cost_input_per_1m),
            ("cost_output_per_1m", self.cost_output_per_1m),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Configuration(format!(
                    "{key}: {field} must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.avg_latency_ms.is_finite() || self.avg_latency_ms <= 0.0 {
            return Err(Error::Configuration(format!(
                "{key}: avg_latency_ms must be positive, got {}",
                self.avg_latency_ms
            )));
        }
        if self.context_window == 0 {
            return Err(Error::Configuration(format!(
                "{key}: context_window must be positive"
            )));
        }
        Ok(())
    }
}

//! Caller-supplied routing constraints and filter diagnostics.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::model::ModelKey;

/// Requirements for a single routing call.
///
/// Every field defaults to "no requirement".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConstraints {
    /// Capabilities every candidate must advertise
    pub required_capabilities: BTreeSet<String>,
    /// Upper bound on mean cost per one thousand tokens
    pub max_cost_per_1k_tokens: Option<f64>,
    /// Upper bound on estimated latency
    pub max_latency_ms: Option<f64>,
    /// Lower bound on the context window
    pub min_context_window: Option<u64>,
    /// Providers favoured when scores tie, best first
    pub preferred_providers: Vec<String>,
    /// Providers that must never be selected
    pub excluded_providers: BTreeSet<String>,
}

impl RoutingConstraints {
    /// Creates an empty constraint set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a capability.
    #[must_use]
    pub fn with_capability<T: Into<String>>(mut self, capability: T) -> Self {
        self.required_capabilities.insert(capability.into());
        self
    }

    /// Caps the mean cost per one thousand tokens.
    #[must_use]
    pub fn with_max_cost_per_1k(mut self, max_cost: f64) -> Self {
        self.max_cost_per_1k_tokens = Some(max_cost);
        self
    }

    /// Caps the estimated latency.
    #[must_use]
    pub fn with_max_latency_ms(mut self, max_latency_ms: f64) -> Self {
        self.max_latency_ms = Some(max_latency_ms);
        self
    }

    /// Requires a minimum context window.
    #[must_use]
    pub fn with_min_context_window(mut self, tokens: u64) -> Self {
        self.min_context_window = Some(tokens);
        self
    }

    /// Appends a preferred provider.
    #[must_use]
    pub fn with_preferred_provider<T: Into<String>>(mut self, provider: T) -> Self {
        self.preferred_providers.push(provider.into());
        self
    }

    /// Excludes a provider.
    #[must_use]
    pub fn with_excluded_provider<T: Into<String>>(mut self, provider: T) -> Self {
        self.excluded_providers.insert(provider.into());
        self
    }

    /// Rank of a provider in the preference list, lower is better.
    ///
    /// Providers not listed rank after every listed one.
    pub fn preference_rank(&self, provider: &str) -> usize {
        self.preferred_providers
            .iter()
            .position(|preferred| preferred == provider)
            .unwrap_or(usize::MAX)
    }
}

/// Individual constraint kinds, in the order the filter applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// `excluded_providers`
    ExcludedProvider,
    /// `required_capabilities`
    RequiredCapability,
    /// `min_context_window`
    MinContextWindow,
    /// `max_latency_ms`
    MaxLatency,
    /// `max_cost_per_1k_tokens`
    MaxCost,
}

impl ConstraintKind {
    /// All kinds in filter order.
    pub const ALL: [Self; 5] = [
        Self::ExcludedProvider,
        Self::RequiredCapability,
        Self::MinContextWindow,
        Self::MaxLatency,
        Self::MaxCost,
    ];

    /// Field name of the constraint in [`RoutingConstraints`].
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::ExcludedProvider => "excluded_providers",
            Self::RequiredCapability => "required_capabilities",
            Self::MinContextWindow => "min_context_window",
            Self::MaxLatency => "max_latency_ms",
            Self::MaxCost => "max_cost_per_1k_tokens",
        }
    }
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.field_name())
    }
}

/// Models removed by one filter step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    /// Constraint applied by the step
    pub constraint: ConstraintKind,
    /// Models the step removed
    pub removed: Vec<ModelKey>,
}

/// Diagnostics for a filter run that left no candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationReport {
    /// Number of models in the snapshot before filtering
    pub registry_size: usize,
    /// Every step that removed at least one model
    pub eliminations: Vec<Elimination>,
    /// Constraints that removed the last surviving candidates
    pub binding: Vec<ConstraintKind>,
}

impl Display for EliminationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.registry_size == 0 {
            return f.write_str("the model registry is empty");
        }
        write!(f, "{} registered model(s) filtered out", self.registry_size)?;
        for elimination in &self.eliminations {
            write!(
                f,
                "; {} removed {}",
                elimination.constraint,
                elimination.removed.len()
            )?;
        }
        if !self.binding.is_empty() {
            let binding: Vec<&str> = self.binding.iter().map(|kind| kind.field_name()).collect();
            write!(f, "; binding: {}", binding.join(", "))?;
        }
        Ok(())
    }
}

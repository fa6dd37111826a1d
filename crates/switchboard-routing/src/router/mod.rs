//! Request routing: analysis, filtering and scoring composed into decisions.
//!
//! A [`Router`] pins one registry snapshot per call, so a concurrent
//! [`RegistryHandle::publish`] never changes the candidate set of a call that
//! is already in flight.

/// Routing decisions and objectives
pub mod decision;

use crate::analyzer::{ComplexityAnalyzer, ComplexityScore};
use crate::config::RouterConfig;
use crate::filter::CapabilityFilter;
use crate::registry::{ModelRegistry, RegistryHandle};
use crate::scorer::{ScoredCandidate, StrategyScorer};
use std::borrow::Cow;
use std::sync::Arc;
use switchboard_core::{
    Error, ExtractionMode, Message, ModelKey, ModelMetadata, Result, RoutingConstraints, Strategy,
};
use tracing::{debug, info, warn};

pub use decision::{RoutingDecision, RoutingObjective};

/// Capability required for inline images and image documents.
pub const VISION_CAPABILITY: &str = "vision";

/// File-type tags that name an image format.
const IMAGE_FILE_TYPES: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "image"];

/// Selects models for conversations and document extraction.
///
/// Holds no mutable state; share it behind an `Arc` and call it from any
/// number of threads.
#[derive(Debug)]
pub struct Router {
    registry: Arc<RegistryHandle>,
    analyzer: ComplexityAnalyzer,
    scorer: StrategyScorer,
    infer_vision: bool,
}

impl Router {
    /// Creates a router over a registry handle.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if the configuration is invalid.
    pub fn new(registry: Arc<RegistryHandle>, config: RouterConfig) -> Result<Self> {
        config.validate()?;
        let RouterConfig {
            infer_vision,
            analyzer,
            scoring,
        } = config;

        Ok(Self {
            registry,
            analyzer: ComplexityAnalyzer::new(analyzer)?,
            scorer: StrategyScorer::new(scoring),
            infer_vision,
        })
    }

    /// Creates a router with the default configuration.
    ///
    /// # Errors
    /// Returns an error only if the built-in configuration is invalid.
    pub fn with_defaults(registry: Arc<RegistryHandle>) -> Result<Self> {
        Self::new(registry, RouterConfig::default())
    }

    /// Registry handle this router reads from.
    pub fn registry(&self) -> &Arc<RegistryHandle> {
        &self.registry
    }

    /// Complexity analyzer used by [`Self::route`].
    pub fn analyzer(&self) -> &ComplexityAnalyzer {
        &self.analyzer
    }

    /// Selects the best model for a conversation.
    ///
    /// # Errors
    /// Returns [`Error::NoCandidates`] or [`Error::ConstraintConflict`] when no
    /// model satisfies the constraints, [`Error::InvalidArgument`] for
    /// malformed numeric bounds, and [`Error::Configuration`] if an invalid
    /// entry reached the candidate set.
    pub fn route(
        &self,
        conversation: &[Message],
        constraints: &RoutingConstraints,
        strategy: Strategy,
    ) -> Result<RoutingDecision> {
        let complexity = self.analyzer.analyze(conversation);
        self.route_with_complexity(conversation, constraints, strategy, complexity)
    }

    /// Same as [`Self::route`] with an externally supplied complexity.
    ///
    /// The complexity is clamped to `[0, 1]`.
    ///
    /// # Errors
    /// As [`Self::route`], plus [`Error::InvalidArgument`] for a NaN
    /// complexity.
    pub fn route_with_complexity(
        &self,
        conversation: &[Message],
        constraints: &RoutingConstraints,
        strategy: Strategy,
        complexity: ComplexityScore,
    ) -> Result<RoutingDecision> {
        if complexity.is_nan() {
            return Err(Error::InvalidArgument(
                "complexity must be a number".to_owned(),
            ));
        }
        let complexity = complexity.clamp(0.0, 1.0);
        let objective = RoutingObjective::Strategy(strategy);

        let trace = self
            .rank_conversation(conversation, constraints, strategy, complexity)
            .inspect_err(|error| log_failure(objective, error))?;
        decide(trace, objective, complexity)
    }

    /// Ranked fallback list for a conversation, best first.
    ///
    /// The first entry is the model [`Self::route`] selects; the list holds at
    /// most `count` distinct keys.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] when `count` is zero, otherwise the
    /// same errors as [`Self::route`].
    pub fn fallback_chain(
        &self,
        conversation: &[Message],
        constraints: &RoutingConstraints,
        strategy: Strategy,
        count: usize,
    ) -> Result<Vec<ModelKey>> {
        if count == 0 {
            return Err(Error::InvalidArgument(
                "fallback chain length must be at least 1".to_owned(),
            ));
        }
        let complexity = self.analyzer.analyze(conversation);
        let objective = RoutingObjective::Strategy(strategy);

        let trace = self
            .rank_conversation(conversation, constraints, strategy, complexity)
            .inspect_err(|error| log_failure(objective, error))?;
        let chain: Vec<ModelKey> = trace
            .into_iter()
            .take(count)
            .map(|candidate| candidate.key)
            .collect();

        debug!(%objective, requested = count, length = chain.len(), "Built fallback chain");
        Ok(chain)
    }

    /// Selects the best model for extracting data from a document.
    ///
    /// Image file types require the `vision` capability. No conversation is
    /// analyzed, so the decision records a complexity of `0.0`.
    ///
    /// # Errors
    /// Same as [`Self::route`].
    pub fn route_for_extraction(
        &self,
        file_type: &str,
        mode: ExtractionMode,
        constraints: &RoutingConstraints,
    ) -> Result<RoutingDecision> {
        let objective = RoutingObjective::Extraction(mode);
        let constraints = if is_image_file_type(file_type) {
            with_vision(constraints)
        } else {
            Cow::Borrowed(constraints)
        };

        let trace = self
            .ranked(&constraints, |candidates, scorer| {
                scorer.score_extraction(candidates, mode, &constraints.preferred_providers)
            })
            .inspect_err(|error| log_failure(objective, error))?;
        decide(trace, objective, 0.0)
    }

    fn rank_conversation(
        &self,
        conversation: &[Message],
        constraints: &RoutingConstraints,
        strategy: Strategy,
        complexity: ComplexityScore,
    ) -> Result<Vec<ScoredCandidate>> {
        let constraints = if self.infer_vision && conversation.iter().any(Message::has_image) {
            with_vision(constraints)
        } else {
            Cow::Borrowed(constraints)
        };

        self.ranked(&constraints, |candidates, scorer| {
            scorer.score(
                candidates,
                strategy,
                complexity,
                &constraints.preferred_providers,
            )
        })
    }

    /// Pins a snapshot, filters it and hands the survivors to `score`.
    fn ranked<F>(&self, constraints: &RoutingConstraints, score: F) -> Result<Vec<ScoredCandidate>>
    where
        F: FnOnce(&[&ModelMetadata], &StrategyScorer) -> Vec<ScoredCandidate>,
    {
        check_bounds(constraints)?;
        let snapshot = self.registry.snapshot();
        let candidates = candidates(&snapshot, constraints)?;
        Ok(score(&candidates, &self.scorer))
    }
}

/// Filters a snapshot and re-checks every survivor.
fn candidates<'registry>(
    registry: &'registry ModelRegistry,
    constraints: &RoutingConstraints,
) -> Result<Vec<&'registry ModelMetadata>> {
    let candidates = CapabilityFilter::apply(registry, constraints)?;
    for candidate in &candidates {
        candidate.validate()?;
    }
    Ok(candidates)
}

fn decide(
    trace: Vec<ScoredCandidate>,
    objective: RoutingObjective,
    complexity: ComplexityScore,
) -> Result<RoutingDecision> {
    let Some(best) = trace.first() else {
        return Err(Error::NoCandidates(Box::default()));
    };
    let selected = best.key.clone();

    info!(
        %selected,
        %objective,
        score = best.score,
        complexity,
        candidates = trace.len(),
        "Routing decision"
    );

    Ok(RoutingDecision {
        selected,
        objective,
        complexity,
        trace,
    })
}

fn log_failure(objective: RoutingObjective, error: &Error) {
    if error.is_no_candidate() {
        warn!(%objective, %error, "No model satisfies the routing constraints");
    } else {
        warn!(%objective, %error, "Routing failed");
    }
}

/// Rejects numeric bounds that cannot describe a real limit.
fn check_bounds(constraints: &RoutingConstraints) -> Result<()> {
    for (name, bound) in [
        ("max_cost_per_1k_tokens", constraints.max_cost_per_1k_tokens),
        ("max_latency_ms", constraints.max_latency_ms),
    ] {
        if let Some(value) = bound
            && (value.is_nan() || value < 0.0)
        {
            return Err(Error::InvalidArgument(format!(
                "{name} must be a non-negative number, got {value}"
            )));
        }
    }
    Ok(())
}

fn with_vision(constraints: &RoutingConstraints) -> Cow<'_, RoutingConstraints> {
    if constraints.required_capabilities.contains(VISION_CAPABILITY) {
        Cow::Borrowed(constraints)
    } else {
        Cow::Owned(constraints.clone().with_capability(VISION_CAPABILITY))
    }
}

/// Whether a file-type tag (`png`, `.JPG`, `image/webp`, ...) names an image.
fn is_image_file_type(file_type: &str) -> bool {
    let normalized = file_type.trim().trim_start_matches('.').to_ascii_lowercase();
    normalized.starts_with("image/") || IMAGE_FILE_TYPES.contains(&normalized.as_str())
}

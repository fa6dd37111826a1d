//! Model routing engine.
//!
//! Given a conversation, hard constraints and an objective, the [`Router`]
//! picks which `(provider, model)` pair should serve the request:
//!
//! 1. [`ComplexityAnalyzer`] scores the conversation in `[0, 1]`
//! 2. [`CapabilityFilter`] removes models violating hard constraints
//! 3. [`StrategyScorer`] orders the survivors under the chosen strategy
//!
//! Registry snapshots are published through a [`RegistryHandle`] and read
//! without locks.

/// Conversation complexity estimation
pub mod analyzer;
/// TOML model catalogs
pub mod catalog;
/// Router configuration
pub mod config;
/// Hard-constraint filtering
pub mod filter;
/// Reasoning model detection
pub mod reasoning;
/// Registry snapshots and the publishing handle
pub mod registry;
/// Routing decisions
pub mod router;
/// Strategy scoring
pub mod scorer;

pub use analyzer::{
    AnalyzerConfig, ComplexityAnalyzer, ComplexityBreakdown, ComplexityScore, FactorWeights,
};
pub use catalog::{registry_from_file, registry_from_toml_str};
pub use config::RouterConfig;
pub use filter::{CapabilityFilter, FilterOutcome};
pub use reasoning::is_reasoning_model;
pub use registry::{ModelRegistry, RegistryHandle};
pub use router::{Router, RoutingDecision, RoutingObjective, VISION_CAPABILITY};
pub use scorer::{HybridWeights, Normalization, ScoredCandidate, ScoringConfig, StrategyScorer};
pub use switchboard_core::{
    ConstraintKind, Elimination, EliminationReport, Error, ExtractionMode, Message, ModelKey,
    ModelMetadata, Result, Role, RoutingConstraints, Strategy,
};

//! Hard-constraint filtering of registry snapshots.
//!
//! Constraints are applied in a fixed order and each step records what it
//! removed, so an empty result can name the constraint that was binding.
use crate::registry::ModelRegistry;
use switchboard_core::{
    ConstraintKind, Elimination, EliminationReport, Error, ModelMetadata, Result,
    RoutingConstraints,
};
use tracing::debug;

/// Candidates surviving every filter step, plus what each step removed.
#[derive(Debug, Clone)]
pub struct FilterOutcome<'registry> {
    /// Surviving candidates in registry key order
    pub candidates: Vec<&'registry ModelMetadata>,
    /// Steps that removed at least one model, in application order
    pub eliminations: Vec<Elimination>,
}

/// Applies [`RoutingConstraints`] to a registry snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapabilityFilter;

impl CapabilityFilter {
    /// Filters the snapshot, failing when nothing survives.
    ///
    /// # Errors
    /// Returns [`Error::ConstraintConflict`] when a single constraint cannot be
    /// met by any registered model, or [`Error::NoCandidates`] with the
    /// elimination report when the combination empties the candidate set.
    pub fn apply<'registry>(
        registry: &'registry ModelRegistry,
        constraints: &RoutingConstraints,
    ) -> Result<Vec<&'registry ModelMetadata>> {
        Self::check_conflicts(registry, constraints)?;

        let outcome = Self::run(registry, constraints);
        if outcome.candidates.is_empty() {
            let binding = outcome
                .eliminations
                .last()
                .map(|elimination| vec![elimination.constraint])
                .unwrap_or_default();
            return Err(Error::NoCandidates(Box::new(EliminationReport {
                registry_size: registry.len(),
                eliminations: outcome.eliminations,
                binding,
            })));
        }
        Ok(outcome.candidates)
    }

    /// Runs every filter step without failing on an empty result.
    pub fn run<'registry>(
        registry: &'registry ModelRegistry,
        constraints: &RoutingConstraints,
    ) -> FilterOutcome<'registry> {
        let mut candidates: Vec<&ModelMetadata> = registry.iter().collect();
        let mut eliminations = Vec::new();

        for kind in ConstraintKind::ALL {
            if !is_active(kind, constraints) {
                continue;
            }
            let (kept, removed): (Vec<&ModelMetadata>, Vec<&ModelMetadata>) = candidates
                .into_iter()
                .partition(|model| satisfies(kind, model, constraints));
            candidates = kept;

            if !removed.is_empty() {
                debug!(
                    constraint = %kind,
                    removed = removed.len(),
                    remaining = candidates.len(),
                    "Filter step eliminated candidates"
                );
                eliminations.push(Elimination {
                    constraint: kind,
                    removed: removed.iter().map(|model| model.key()).collect(),
                });
            }
        }

        FilterOutcome {
            candidates,
            eliminations,
        }
    }

    /// Checks each constraint in isolation against the whole snapshot.
    ///
    /// # Errors
    /// Returns [`Error::ConstraintConflict`] for the first constraint, in
    /// filter order, that no registered model satisfies on its own.
    pub fn check_conflicts(registry: &ModelRegistry, constraints: &RoutingConstraints) -> Result<()> {
        if registry.is_empty() {
            return Ok(());
        }

        for kind in ConstraintKind::ALL {
            if kind == ConstraintKind::ExcludedProvider || !is_active(kind, constraints) {
                continue;
            }
            if registry.iter().any(|model| satisfies(kind, model, constraints)) {
                continue;
            }
            return Err(Error::ConstraintConflict {
                constraint: kind,
                detail: conflict_detail(kind, registry, constraints),
            });
        }
        Ok(())
    }
}

fn is_active(kind: ConstraintKind, constraints: &RoutingConstraints) -> bool {
    match kind {
        ConstraintKind::ExcludedProvider => !constraints.excluded_providers.is_empty(),
        ConstraintKind::RequiredCapability => !constraints.required_capabilities.is_empty(),
        ConstraintKind::MinContextWindow => constraints.min_context_window.is_some(),
        ConstraintKind::MaxLatency => constraints.max_latency_ms.is_some(),
        ConstraintKind::MaxCost => constraints.max_cost_per_1k_tokens.is_some(),
    }
}

fn satisfies(kind: ConstraintKind, model: &ModelMetadata, constraints: &RoutingConstraints) -> bool {
    match kind {
        ConstraintKind::ExcludedProvider => !constraints.excluded_providers.contains(&model.provider),
        ConstraintKind::RequiredCapability => constraints
            .required_capabilities
            .iter()
            .all(|capability| model.has_capability(capability)),
        ConstraintKind::MinContextWindow => constraints
            .min_context_window
            .is_none_or(|minimum| model.context_window >= minimum),
        ConstraintKind::MaxLatency => constraints
            .max_latency_ms
            .is_none_or(|maximum| model.avg_latency_ms <= maximum),
        ConstraintKind::MaxCost => constraints
            .max_cost_per_1k_tokens
            .is_none_or(|maximum| model.mean_cost_per_1k() <= maximum),
    }
}

fn conflict_detail(
    kind: ConstraintKind,
    registry: &ModelRegistry,
    constraints: &RoutingConstraints,
) -> String {
    match kind {
        ConstraintKind::ExcludedProvider => "every provider is excluded".to_owned(),
        ConstraintKind::RequiredCapability => {
            let required: Vec<&str> = constraints
                .required_capabilities
                .iter()
                .map(String::as_str)
                .collect();
            format!(
                "no registered model offers all of: {}",
                required.join(", ")
            )
        }
        ConstraintKind::MinContextWindow => {
            let largest = registry
                .iter()
                .map(|model| model.context_window)
                .max()
                .unwrap_or_default();
            format!(
                "requires {} tokens but the largest context window is {largest}",
                constraints.min_context_window.unwrap_or_default()
            )
        }
        ConstraintKind::MaxLatency => {
            let fastest = registry
                .iter()
                .map(|model| model.avg_latency_ms)
                .fold(f64::INFINITY, f64::min);
            format!(
                "limit is {}ms but the fastest model averages {fastest}ms",
                constraints.max_latency_ms.unwrap_or_default()
            )
        }
        ConstraintKind::MaxCost => {
            let cheapest = registry
                .iter()
                .map(ModelMetadata::mean_cost_per_1k)
                .fold(f64::INFINITY, f64::min);
            format!(
                "limit is {} per 1k tokens but the cheapest model costs {cheapest}",
                constraints.max_cost_per_1k_tokens.unwrap_or_default()
            )
        }
    }
}

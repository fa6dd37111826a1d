//! Property tests for the analyzer, filter, scorer and fallback chain
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::tests_outside_test_module,
        reason = "Test allows"
    )
)]

mod common;

use common::{registry, router_with};
use proptest::prelude::*;
use std::collections::BTreeSet;
use switchboard_routing::{
    CapabilityFilter, ComplexityAnalyzer, HybridWeights, Message, ModelKey, ModelMetadata,
    RoutingConstraints, Strategy as RoutingStrategy,
};

const CAPABILITIES: [&str; 3] = ["vision", "tools", "json"];

fn arb_message() -> impl Strategy<Value = Message> {
    let content = prop_oneof![
        ".{0,200}",
        "[a-z_ ]{0,80}(step by step|prove|compare|```|x = 2 \\+ 3|fn main\\(\\) \\{\\}){0,3}",
    ];
    (0u8..3, content).prop_map(|(role, content)| match role {
        0 => Message::system(content),
        1 => Message::user(content),
        _ => Message::assistant(content),
    })
}

fn arb_conversation() -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec(arb_message(), 0..16)
}

fn arb_models() -> impl Strategy<Value = Vec<ModelMetadata>> {
    let model = (
        0.0f64..=1.0,
        0.0f64..40.0,
        0.0f64..80.0,
        1.0f64..10_000.0,
        1u64..1_000_000,
        prop::collection::btree_set(prop::sample::select(CAPABILITIES.to_vec()), 0..3),
        any::<bool>(),
    );
    prop::collection::vec(model, 1..8).prop_map(|models| {
        models
            .into_iter()
            .enumerate()
            .map(
                |(index, (quality, cost_in, cost_out, latency, context, capabilities, reasoning))| {
                    let mut metadata = ModelMetadata::new(
                        format!("provider-{}", index % 3),
                        format!("model-{index}"),
                        quality,
                        cost_in,
                        cost_out,
                        latency,
                        context,
                    )
                    .with_reasoning(reasoning);
                    for capability in capabilities {
                        metadata = metadata.with_capability(capability);
                    }
                    metadata
                },
            )
            .collect()
    })
}

fn arb_constraints() -> impl Strategy<Value = RoutingConstraints> {
    (
        prop::collection::btree_set(prop::sample::select(CAPABILITIES.to_vec()), 0..2),
        prop::option::of(0.0f64..0.05),
        prop::option::of(1.0f64..10_000.0),
        prop::option::of(1u64..1_000_000),
        prop::collection::btree_set(
            prop::sample::select(vec!["provider-0", "provider-1", "provider-2"]),
            0..2,
        ),
    )
        .prop_map(|(capabilities, max_cost, max_latency, min_context, excluded)| {
            let mut constraints = RoutingConstraints::new();
            for capability in capabilities {
                constraints = constraints.with_capability(capability);
            }
            for provider in excluded {
                constraints = constraints.with_excluded_provider(provider);
            }
            constraints.max_cost_per_1k_tokens = max_cost;
            constraints.max_latency_ms = max_latency;
            constraints.min_context_window = min_context;
            constraints
        })
}

fn arb_strategy() -> impl Strategy<Value = RoutingStrategy> {
    prop::sample::select(RoutingStrategy::ALL.to_vec())
}

/// Every requirement of `base` plus every requirement of `extra`.
fn tighten(base: &RoutingConstraints, extra: &RoutingConstraints) -> RoutingConstraints {
    let mut merged = base.clone();
    merged
        .required_capabilities
        .extend(extra.required_capabilities.iter().cloned());
    merged
        .excluded_providers
        .extend(extra.excluded_providers.iter().cloned());
    merged.max_cost_per_1k_tokens = tighter(
        base.max_cost_per_1k_tokens,
        extra.max_cost_per_1k_tokens,
        f64::min,
    );
    merged.max_latency_ms = tighter(base.max_latency_ms, extra.max_latency_ms, f64::min);
    merged.min_context_window =
        tighter(base.min_context_window, extra.min_context_window, u64::max);
    merged
}

fn tighter<T: Copy>(left: Option<T>, right: Option<T>, pick: fn(T, T) -> T) -> Option<T> {
    match (left, right) {
        (Some(first), Some(second)) => Some(pick(first, second)),
        (first, second) => first.or(second),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Complexity always lands in `[0, 1]`.
    #[test]
    fn prop_complexity_is_bounded(conversation in arb_conversation()) {
        let analyzer = ComplexityAnalyzer::with_defaults().unwrap();
        let score = analyzer.analyze(&conversation);
        prop_assert!((0.0..=1.0).contains(&score), "score {score} out of range");
        if conversation.is_empty() {
            prop_assert!(score.abs() < f64::EPSILON);
        }
    }

    /// Hybrid weights always sum to one.
    #[test]
    fn prop_hybrid_weights_sum_to_one(complexity in 0.0f64..=1.0) {
        let weights = HybridWeights::for_complexity(complexity);
        prop_assert!((weights.total() - 1.0).abs() < 1e-9);
        prop_assert!(weights.quality >= 0.0 && weights.cost >= 0.0 && weights.latency >= 0.0);
    }

    /// Adding requirements never grows the candidate set.
    #[test]
    fn prop_filter_is_monotonic(
        models in arb_models(),
        base in arb_constraints(),
        extra in arb_constraints(),
    ) {
        let registry = registry(models);
        let loose: BTreeSet<ModelKey> = CapabilityFilter::run(&registry, &base)
            .candidates
            .iter()
            .map(|model| model.key())
            .collect();
        let strict: BTreeSet<ModelKey> = CapabilityFilter::run(&registry, &tighten(&base, &extra))
            .candidates
            .iter()
            .map(|model| model.key())
            .collect();
        prop_assert!(strict.is_subset(&loose));
    }

    /// Fallback chains are short, distinct and agree with `route`.
    #[test]
    fn prop_fallback_chain_agrees_with_route(
        models in arb_models(),
        conversation in arb_conversation(),
        constraints in arb_constraints(),
        strategy in arb_strategy(),
        count in 1usize..6,
    ) {
        let router = router_with(models);
        let routed = router.route(&conversation, &constraints, strategy);
        let chain = router.fallback_chain(&conversation, &constraints, strategy, count);

        match (routed, chain) {
            (Ok(decision), Ok(chain)) => {
                prop_assert!(chain.len() <= count);
                prop_assert_eq!(chain.first(), Some(&decision.selected));
                let distinct: BTreeSet<&ModelKey> = chain.iter().collect();
                prop_assert_eq!(distinct.len(), chain.len());
            }
            (Err(route_error), Err(chain_error)) => {
                prop_assert!(route_error.is_no_candidate());
                prop_assert_eq!(route_error.to_string(), chain_error.to_string());
            }
            (routed, chain) => {
                prop_assert!(false, "route {routed:?} disagrees with chain {chain:?}");
            }
        }
    }

    /// Routing the same request twice gives the same decision.
    #[test]
    fn prop_routing_is_deterministic(
        models in arb_models(),
        conversation in arb_conversation(),
        strategy in arb_strategy(),
    ) {
        let router = router_with(models);
        let constraints = RoutingConstraints::new();
        let first = router.route(&conversation, &constraints, strategy);
        let second = router.route(&conversation, &constraints, strategy);
        prop_assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }
}

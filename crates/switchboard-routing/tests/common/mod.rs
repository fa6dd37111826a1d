//! Shared fixtures for switchboard-routing integration tests
#![cfg_attr(
    test,
    allow(
        dead_code,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::tests_outside_test_module,
        reason = "Test allows"
    )
)]

use std::env;
use std::sync::{Arc, Once};
use switchboard_routing::{ModelMetadata, ModelRegistry, RegistryHandle, Router};
use tracing_subscriber::{EnvFilter, fmt};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests (idempotent).
/// Honors `RUST_LOG` if set, otherwise defaults to "debug".
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_owned());
        if fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_test_writer()
            .try_init()
            .is_err()
        {
            // tracing already initialized in this process
        }
    });
}

/// Cheap, fast, modest quality.
pub fn model_a() -> ModelMetadata {
    ModelMetadata::new("provider-a", "model-a", 0.70, 0.1, 0.4, 300.0, 128_000)
}

/// Expensive, slow, best quality.
pub fn model_b() -> ModelMetadata {
    ModelMetadata::new("provider-b", "model-b", 0.95, 1.0, 3.0, 3_000.0, 200_000)
}

/// Middle of the road.
pub fn model_c() -> ModelMetadata {
    ModelMetadata::new("provider-c", "model-c", 0.85, 0.5, 1.0, 800.0, 128_000)
}

/// The three-model registry used by the routing scenarios.
pub fn scenario_models() -> Vec<ModelMetadata> {
    vec![model_a(), model_b(), model_c()]
}

/// Builds a registry, panicking on invalid fixtures.
pub fn registry(models: Vec<ModelMetadata>) -> ModelRegistry {
    match ModelRegistry::new(models) {
        Ok(registry) => registry,
        Err(error) => panic!("fixture registry invalid: {error}"),
    }
}

/// Router with default configuration over the given models.
pub fn router_with(models: Vec<ModelMetadata>) -> Router {
    init_tracing();
    let handle = Arc::new(RegistryHandle::new(registry(models)));
    match Router::with_defaults(handle) {
        Ok(router) => router,
        Err(error) => panic!("router construction failed: {error}"),
    }
}

/// Router over the scenario registry.
pub fn scenario_router() -> Router {
    router_with(scenario_models())
}

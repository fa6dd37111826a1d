//! TOML catalog reader producing validated registry snapshots.
//!
//! ```toml
//! [[models]]
//! provider = "openai"
//! model = "gpt-4o-mini"
//! quality_score = 0.82
//! cost_input_per_1m = 0.15
//! cost_output_per_1m = 0.6
//! avg_latency_ms = 600.0
//! context_window = 128000
//! capabilities = ["vision", "tools"]
//! ```
use crate::reasoning::is_reasoning_model;
use crate::registry::ModelRegistry;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use switchboard_core::{Error, ModelMetadata, Result};
use toml::from_str;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    models: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogEntry {
    provider: String,
    model: String,
    quality_score: f64,
    cost_input_per_1m: f64,
    cost_output_per_1m: f64,
    avg_latency_ms: f64,
    context_window: u64,
    #[serde(default)]
    capabilities: BTreeSet<String>,
    reasoning_model: Option<bool>,
    #[serde(default = "default_streaming")]
    supports_streaming: bool,
}

const fn default_streaming() -> bool {
    true
}

impl From<CatalogEntry> for ModelMetadata {
    fn from(entry: CatalogEntry) -> Self {
        let reasoning_model = entry
            .reasoning_model
            .unwrap_or_else(|| is_reasoning_model(&entry.provider, &entry.model));
        Self {
            provider: entry.provider,
            model: entry.model,
            quality_score: entry.quality_score,
            cost_input_per_1m: entry.cost_input_per_1m,
            cost_output_per_1m: entry.cost_output_per_1m,
            avg_latency_ms: entry.avg_latency_ms,
            context_window: entry.context_window,
            capabilities: entry.capabilities,
            reasoning_model,
            supports_streaming: entry.supports_streaming,
        }
    }
}

/// Parses a TOML catalog into a registry snapshot.
///
/// Entries that omit `reasoning_model` get it inferred from their name.
///
/// # Errors
/// Returns [`Error::Configuration`] for malformed TOML, missing fields, or
/// entries that fail validation.
pub fn registry_from_toml_str(contents: &str) -> Result<ModelRegistry> {
    let catalog: CatalogFile = from_str(contents)
        .map_err(|error| Error::Configuration(format!("Failed to parse model catalog: {error}")))?;
    ModelRegistry::new(catalog.models.into_iter().map(ModelMetadata::from))
}

/// Reads a TOML catalog file into a registry snapshot.
///
/// # Errors
/// Returns an error if the file cannot be read or its contents are invalid.
pub fn registry_from_file(path: &Path) -> Result<ModelRegistry> {
    let contents = fs::read_to_string(path)?;
    registry_from_toml_str(&contents)
}

//! Router configuration: analyzer tables, scoring tunables and feature flags.

use crate::analyzer::AnalyzerConfig;
use crate::scorer::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use switchboard_core::Result;
use toml::{from_str, to_string_pretty};

/// Complete router configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Require `vision` when a conversation carries inline images
    pub infer_vision: bool,
    /// Complexity analyzer tables
    pub analyzer: AnalyzerConfig,
    /// Scoring tunables
    pub scoring: ScoringConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            infer_vision: true,
            analyzer: AnalyzerConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl RouterConfig {
    /// Parses configuration from TOML; missing sections keep their defaults.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or values are out of range.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Save config to a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = to_string_pretty(self)?;
        let header = "# Switchboard router configuration\n\
                      # Edit this file to tune complexity analysis and scoring\n\n";

        fs::write(path, format!("{header}{contents}"))?;
        Ok(())
    }

    /// Checks every section.
    ///
    /// # Errors
    /// Returns [`switchboard_core::Error::Configuration`] for invalid values.
    pub fn validate(&self) -> Result<()> {
        self.analyzer.validate()?;
        self.scoring.validate()
    }
}

//! Routing objectives: general strategies and extraction modes.
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::Error;

/// Optimization objective for general routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Cheapest mean token cost wins
    Cost,
    /// Highest quality wins, with a bonus for reasoning models on complex input
    Quality,
    /// Lowest estimated latency wins
    Latency,
    /// Complexity-adaptive blend of quality, cost and latency
    Hybrid,
}

impl Strategy {
    /// All strategies.
    pub const ALL: [Self; 4] = [Self::Cost, Self::Quality, Self::Latency, Self::Hybrid];

    /// Lowercase name used in configuration and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Quality => "quality",
            Self::Latency => "latency",
            Self::Hybrid => "hybrid",
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cost" => Ok(Self::Cost),
            "quality" => Ok(Self::Quality),
            "latency" => Ok(Self::Latency),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(Error::InvalidStrategy(format!(
                "unknown strategy '{value}', expected one of: cost, quality, latency, hybrid"
            ))),
        }
    }
}

/// Task-specific routing variant for document extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Extract a schema from the document
    Schema,
    /// Extract structural layout
    Structure,
    /// Find errors and inconsistencies
    Errors,
    /// Summarize content
    Summary,
}

impl ExtractionMode {
    /// All extraction modes.
    pub const ALL: [Self; 4] = [Self::Schema, Self::Structure, Self::Errors, Self::Summary];

    /// Lowercase name used in configuration and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::Structure => "structure",
            Self::Errors => "errors",
            Self::Summary => "summary",
        }
    }

    /// Effective quality weight for this mode.
    pub const fn quality_weight(self) -> f64 {
        match self {
            Self::Schema => 0.90,
            Self::Structure => 0.85,
            Self::Errors => 0.80,
            Self::Summary => 0.70,
        }
    }

    /// Bonus added for reasoning models.
    pub const fn reasoning_bonus(self) -> f64 {
        match self {
            Self::Errors => 0.05,
            Self::Schema | Self::Structure | Self::Summary => 0.0,
        }
    }
}

impl Display for ExtractionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionMode {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "schema" => Ok(Self::Schema),
            "structure" => Ok(Self::Structure),
            "errors" => Ok(Self::Errors),
            "summary" => Ok(Self::Summary),
            _ => Err(Error::InvalidStrategy(format!(
                "unknown extraction mode '{value}', expected one of: schema, structure, errors, summary"
            ))),
        }
    }
}

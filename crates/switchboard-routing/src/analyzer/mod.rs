//! Conversation complexity estimation.
//!
//! Five independently normalized factors (reasoning vocabulary, length,
//! technical markup, depth, math notation) are blended linearly into a score
//! in `[0, 1]` that biases hybrid routing towards quality.

/// Complexity analyzer and per-factor breakdown
pub mod complexity;
/// Keyword tables, reference constants and weights
pub mod config;

pub use complexity::{ComplexityAnalyzer, ComplexityBreakdown};
pub use config::{AnalyzerConfig, FactorWeights};

/// Complexity estimate in `[0, 1]`.
pub type ComplexityScore = f64;

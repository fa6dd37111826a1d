//! Lookup tables and reference constants for complexity analysis.
use serde::{Deserialize, Serialize};
use switchboard_core::{Error, Result};

/// Tolerance used when checking that factor weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Relative weight of each complexity factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorWeights {
    /// Reasoning-indicative vocabulary
    pub reasoning: f64,
    /// Total conversation length
    pub length: f64,
    /// Code and technical markup
    pub code: f64,
    /// Conversation depth
    pub depth: f64,
    /// Mathematical notation
    pub math: f64,
}

impl FactorWeights {
    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.reasoning + self.length + self.code + self.depth + self.math
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            reasoning: 0.40,
            length: 0.20,
            code: 0.20,
            depth: 0.10,
            math: 0.10,
        }
    }
}

/// Configuration for [`super::ComplexityAnalyzer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Phrases that indicate multi-step reasoning, matched case-insensitively
    pub reasoning_keywords: Vec<String>,
    /// Number of distinct keyword matches that saturates the reasoning factor
    pub keyword_saturation: usize,
    /// Character count that saturates the length factor
    pub reference_length: usize,
    /// Jargon that counts towards technical density
    pub technical_terms: Vec<String>,
    /// Technical-token density (per word) that saturates the code factor
    pub technical_density_reference: f64,
    /// Turn count that saturates the depth factor
    pub reference_depth: usize,
    /// Regular expressions recognising formula-like tokens
    pub math_patterns: Vec<String>,
    /// Number of math matches that saturates the math factor
    pub math_saturation: usize,
    /// Factor weights, must sum to 1.0
    pub weights: FactorWeights,
}

impl AnalyzerConfig {
    /// Checks weights and reference constants.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] when weights are negative or do not
    /// sum to one, or a reference constant is not positive.
    pub fn validate(&self) -> Result<()> {
        let weights = self.weights;
        for (name, weight) in [
            ("reasoning", weights.reasoning),
            ("length", weights.length),
            ("code", weights.code),
            ("depth", weights.depth),
            ("math", weights.math),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::Configuration(format!(
                    "analyzer weight '{name}' must be non-negative, got {weight}"
                )));
            }
        }
        if (weights.total() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::Configuration(format!(
                "analyzer weights must sum to 1.0, got {}",
                weights.total()
            )));
        }
        if self.keyword_saturation == 0
            || self.reference_length == 0
            || self.reference_depth == 0
            || self.math_saturation == 0
        {
            return Err(Error::Configuration(
                "analyzer saturation and reference values must be positive".to_owned(),
            ));
        }
        if !self.technical_density_reference.is_finite() || self.technical_density_reference <= 0.0
        {
            return Err(Error::Configuration(format!(
                "technical_density_reference must be positive, got {}",
                self.technical_density_reference
            )));
        }
        Ok(())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            reasoning_keywords: to_strings(&[
                "analyze",
                "analyse",
                "prove",
                "step by step",
                "explain why",
                "compare",
                "evaluate",
                "derive",
                "justify",
                "think through",
                "trade-off",
                "implications",
                "critique",
                "why does",
                "how does",
                "in depth",
            ]),
            keyword_saturation: 3,
            reference_length: 2_000,
            technical_terms: to_strings(&[
                "function",
                "class",
                "api",
                "algorithm",
                "database",
                "compile",
                "compiler",
                "runtime",
                "async",
                "struct",
                "interface",
                "thread",
                "query",
                "regex",
                "json",
                "http",
                "schema",
                "kernel",
                "pointer",
                "recursion",
            ]),
            technical_density_reference: 0.15,
            reference_depth: 10,
            math_patterns: to_strings(&[
                r"\d+(\.\d+)?(\s*[+*/^=<>]\s*|\s+-\s+)\d+",
                r"\b[a-z]\s*[=<>]\s*-?\d",
                r"\\(frac|sum|int|sqrt|alpha|beta|theta|lambda|pi)\b",
                r"[∑∫√π∞≤≥≠±∂∇]",
                r"\b(equation|integral|derivative|matrix|theorem|lemma|polynomial|eigenvalue)s?\b",
            ]),
            math_saturation: 5,
            weights: FactorWeights::default(),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = FactorWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-12);
        AnalyzerConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_weights_not_summing_to_one() {
        let mut config = AnalyzerConfig::default();
        config.weights.reasoning = 0.5;
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let mut config = AnalyzerConfig::default();
        config.weights.reasoning = 0.6;
        config.weights.math = -0.1;
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("'math'"));
    }

    #[test]
    fn test_rejects_zero_reference() {
        let mut config = AnalyzerConfig::default();
        config.reference_depth = 0;
        config.validate().unwrap_err();
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AnalyzerConfig = match toml::from_str("reference_length = 500") {
            Ok(value) => value,
            Err(error) => panic!("deserialize failed: {error}"),
        };
        assert_eq!(config.reference_length, 500);
        assert_eq!(config.keyword_saturation, 3);
        assert!(!config.reasoning_keywords.is_empty());
    }
}

//! Strategy scoring of filtered candidates.
//!
//! Every scoring function is pure. Results are totally ordered: score
//! descending, then preferred-provider rank, then provider and model name.

/// Hybrid weights and cost/latency normalization
pub mod hybrid;

use crate::analyzer::ComplexityScore;
use hybrid::Normalizer;
use serde::{Deserialize, Serialize};
use switchboard_core::{Error, ExtractionMode, ModelKey, ModelMetadata, Result, Strategy};

pub use hybrid::{HybridWeights, Normalization};

/// Tunables shared by every strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Bonus for reasoning models under the quality strategy
    pub quality_reasoning_bonus: f64,
    /// Complexity above which the reasoning bonus applies
    pub reasoning_complexity_threshold: f64,
    /// Cost and latency normalization for hybrid and extraction scoring
    pub normalization: Normalization,
}

impl ScoringConfig {
    /// Checks bonus, threshold and normalization values.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if !self.quality_reasoning_bonus.is_finite() || self.quality_reasoning_bonus < 0.0 {
            return Err(Error::Configuration(format!(
                "quality_reasoning_bonus must be non-negative, got {}",
                self.quality_reasoning_bonus
            )));
        }
        if !(0.0..=1.0).contains(&self.reasoning_complexity_threshold) {
            return Err(Error::Configuration(format!(
                "reasoning_complexity_threshold must be within [0, 1], got {}",
                self.reasoning_complexity_threshold
            )));
        }
        self.normalization.validate()
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            quality_reasoning_bonus: 0.05,
            reasoning_complexity_threshold: 0.6,
            normalization: Normalization::default(),
        }
    }
}

/// One entry of a score trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Candidate key
    pub key: ModelKey,
    /// Primary strategy score, higher is better
    pub score: f64,
}

/// Scores candidates under a strategy or extraction mode.
#[derive(Debug, Clone, Default)]
pub struct StrategyScorer {
    config: ScoringConfig,
}

impl StrategyScorer {
    /// Creates a scorer.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores and orders candidates, best first.
    pub fn score(
        &self,
        candidates: &[&ModelMetadata],
        strategy: Strategy,
        complexity: ComplexityScore,
        preferred_providers: &[String],
    ) -> Vec<ScoredCandidate> {
        let normalizer = Normalizer::new(self.config.normalization, candidates);
        let weights = HybridWeights::for_complexity(complexity);

        let scored = candidates.iter().map(|model| {
            let score = match strategy {
                Strategy::Cost => -model.mean_cost_per_1m(),
                Strategy::Quality => model.quality_score + self.quality_bonus(model, complexity),
                Strategy::Latency => -model.avg_latency_ms,
                Strategy::Hybrid => {
                    weights.quality * model.quality_score
                        + weights.cost * normalizer.inverse_cost(model)
                        + weights.latency * normalizer.inverse_latency(model)
                }
            };
            (model.key(), score)
        });
        rank(scored, preferred_providers)
    }

    /// Scores candidates for a document extraction mode, best first.
    ///
    /// Quality is weighted by the mode; the remainder goes to inverse cost.
    pub fn score_extraction(
        &self,
        candidates: &[&ModelMetadata],
        mode: ExtractionMode,
        preferred_providers: &[String],
    ) -> Vec<ScoredCandidate> {
        let normalizer = Normalizer::new(self.config.normalization, candidates);
        let quality_weight = mode.quality_weight();

        let scored = candidates.iter().map(|model| {
            let bonus = if model.reasoning_model {
                mode.reasoning_bonus()
            } else {
                0.0
            };
            let score = quality_weight * model.quality_score
                + (1.0 - quality_weight) * normalizer.inverse_cost(model)
                + bonus;
            (model.key(), score)
        });
        rank(scored, preferred_providers)
    }

    fn quality_bonus(&self, model: &ModelMetadata, complexity: ComplexityScore) -> f64 {
        if model.reasoning_model && complexity > self.config.reasoning_complexity_threshold {
            self.config.quality_reasoning_bonus
        } else {
            0.0
        }
    }
}

/// Orders scored keys: score descending, preference rank, then key.
fn rank<I>(scored: I, preferred_providers: &[String]) -> Vec<ScoredCandidate>
where
    I: Iterator<Item = (ModelKey, f64)>,
{
    let mut ranked: Vec<(usize, ScoredCandidate)> = scored
        .map(|(key, score)| {
            let preference = preferred_providers
                .iter()
                .position(|provider| *provider == key.provider)
                .unwrap_or(usize::MAX);
            (preference, ScoredCandidate { key, score })
        })
        .collect();

    ranked.sort_by(|(left_rank, left), (right_rank, right)| {
        right
            .score
            .total_cmp(&left.score)
            .then_with(|| left_rank.cmp(right_rank))
            .then_with(|| left.key.cmp(&right.key))
    });
    ranked.into_iter().map(|(_, candidate)| candidate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> Vec<ModelMetadata> {
        vec![
            ModelMetadata::new("alpha", "a1", 0.70, 0.1, 0.4, 300.0, 16_000),
            ModelMetadata::new("beta", "b1", 0.95, 1.0, 3.0, 3_000.0, 200_000),
            ModelMetadata::new("gamma", "c1", 0.85, 0.5, 1.0, 800.0, 128_000),
        ]
    }

    fn top(scored: &[ScoredCandidate]) -> String {
        scored
            .first()
            .map(|candidate| candidate.key.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_cost_prefers_cheapest() {
        let models = fixtures();
        let candidates: Vec<&ModelMetadata> = models.iter().collect();
        let scored = StrategyScorer::default().score(&candidates, Strategy::Cost, 0.0, &[]);
        assert_eq!(top(&scored), "alpha/a1");
        assert!((scored[0].score + 0.25).abs() < 1e-12);
        assert_eq!(scored[2].key.provider, "beta");
    }

    #[test]
    fn test_quality_bonus_requires_complexity_and_reasoning() {
        let strong = ModelMetadata::new("beta", "plain", 0.90, 1.0, 1.0, 500.0, 8_000);
        let thinker =
            ModelMetadata::new("delta", "thinker", 0.87, 1.0, 1.0, 500.0, 8_000).with_reasoning(true);
        let candidates = [&strong, &thinker];
        let scorer = StrategyScorer::default();

        let simple = scorer.score(&candidates, Strategy::Quality, 0.3, &[]);
        assert_eq!(top(&simple), "beta/plain");

        let complex = scorer.score(&candidates, Strategy::Quality, 0.8, &[]);
        assert_eq!(top(&complex), "delta/thinker");
        assert!((complex[0].score - 0.92).abs() < 1e-12);
    }

    #[test]
    fn test_bonus_threshold_is_exclusive() {
        let thinker =
            ModelMetadata::new("delta", "thinker", 0.80, 1.0, 1.0, 500.0, 8_000).with_reasoning(true);
        let scored = StrategyScorer::default().score(&[&thinker], Strategy::Quality, 0.6, &[]);
        assert!((scored[0].score - 0.80).abs() < 1e-12);
    }

    #[test]
    fn test_latency_prefers_fastest() {
        let models = fixtures();
        let candidates: Vec<&ModelMetadata> = models.iter().collect();
        let scored = StrategyScorer::default().score(&candidates, Strategy::Latency, 0.0, &[]);
        assert_eq!(top(&scored), "alpha/a1");
        assert!((scored[0].score + 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_hybrid_shifts_with_complexity() {
        let models = fixtures();
        let candidates: Vec<&ModelMetadata> = models.iter().collect();
        let scorer = StrategyScorer::default();

        assert_eq!(
            top(&scorer.score(&candidates, Strategy::Hybrid, 0.0, &[])),
            "alpha/a1"
        );
        assert_eq!(
            top(&scorer.score(&candidates, Strategy::Hybrid, 0.9, &[])),
            "beta/b1"
        );
    }

    #[test]
    fn test_hybrid_min_max_rewards_cheap_and_fast() {
        let models = fixtures();
        let candidates: Vec<&ModelMetadata> = models.iter().collect();
        let scorer = StrategyScorer::new(ScoringConfig {
            normalization: Normalization::MinMax,
            ..ScoringConfig::default()
        });
        // alpha is both cheapest and fastest, so it collects the full cost
        // and latency weights at any complexity.
        assert_eq!(
            top(&scorer.score(&candidates, Strategy::Hybrid, 0.9, &[])),
            "alpha/a1"
        );
    }

    #[test]
    fn test_ties_break_by_provider_then_model() {
        let first = ModelMetadata::new("zeta", "m1", 0.8, 1.0, 1.0, 500.0, 8_000);
        let second = ModelMetadata::new("eta", "m2", 0.8, 1.0, 1.0, 500.0, 8_000);
        let third = ModelMetadata::new("eta", "m1", 0.8, 1.0, 1.0, 500.0, 8_000);
        let scored =
            StrategyScorer::default().score(&[&first, &second, &third], Strategy::Quality, 0.0, &[]);
        let order: Vec<String> = scored.iter().map(|entry| entry.key.to_string()).collect();
        assert_eq!(order, vec!["eta/m1", "eta/m2", "zeta/m1"]);
    }

    #[test]
    fn test_preferred_provider_breaks_exact_ties_only() {
        let first = ModelMetadata::new("eta", "m1", 0.8, 1.0, 1.0, 500.0, 8_000);
        let second = ModelMetadata::new("zeta", "m1", 0.8, 1.0, 1.0, 500.0, 8_000);
        let better = ModelMetadata::new("omega", "m1", 0.81, 1.0, 1.0, 500.0, 8_000);
        let preferred = vec!["zeta".to_owned()];

        let scored = StrategyScorer::default().score(
            &[&first, &second, &better],
            Strategy::Quality,
            0.0,
            &preferred,
        );
        let order: Vec<String> = scored.iter().map(|entry| entry.key.to_string()).collect();
        assert_eq!(order, vec!["omega/m1", "zeta/m1", "eta/m1"]);
    }

    #[test]
    fn test_extraction_weights_quality_by_mode() {
        let cheap = ModelMetadata::new("alpha", "cheap", 0.70, 0.1, 0.1, 300.0, 8_000);
        let strong = ModelMetadata::new("beta", "strong", 0.95, 15.0, 15.0, 2_000.0, 8_000);
        let scorer = StrategyScorer::default();

        // schema: 0.9 * 0.95 + 0.1 * 0.25 = 0.88 vs 0.9 * 0.70 + 0.1 * 0.995 = 0.7295
        let schema = scorer.score_extraction(&[&cheap, &strong], ExtractionMode::Schema, &[]);
        assert_eq!(top(&schema), "beta/strong");
        assert!((schema[0].score - 0.88).abs() < 1e-9);
    }

    #[test]
    fn test_extraction_errors_mode_rewards_reasoning() {
        let plain = ModelMetadata::new("alpha", "plain", 0.90, 1.0, 1.0, 500.0, 8_000);
        let thinker =
            ModelMetadata::new("beta", "thinker", 0.86, 1.0, 1.0, 500.0, 8_000).with_reasoning(true);
        let scorer = StrategyScorer::default();

        let errors = scorer.score_extraction(&[&plain, &thinker], ExtractionMode::Errors, &[]);
        assert_eq!(top(&errors), "beta/thinker");

        let summary = scorer.score_extraction(&[&plain, &thinker], ExtractionMode::Summary, &[]);
        assert_eq!(top(&summary), "alpha/plain");
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let models = fixtures();
        let candidates: Vec<&ModelMetadata> = models.iter().collect();
        let scorer = StrategyScorer::default();
        for strategy in Strategy::ALL {
            let first = scorer.score(&candidates, strategy, 0.42, &[]);
            let second = scorer.score(&candidates, strategy, 0.42, &[]);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_config_validation() {
        ScoringConfig::default().validate().unwrap();
        let config = ScoringConfig {
            reasoning_complexity_threshold: 1.5,
            ..ScoringConfig::default()
        };
        config.validate().unwrap_err();
    }
}

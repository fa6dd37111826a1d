use serde::{Deserialize, Serialize};
use switchboard_core::{Error, ModelMetadata, Result};

/// Spread below which observed values are treated as identical.
const DEGENERATE_SPREAD: f64 = 1e-12;

/// Complexity-adaptive blend weights for hybrid routing.
///
/// For every complexity `c` in `[0, 1]` the three weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HybridWeights {
    /// Weight on quality, `0.1 + 0.5c`
    pub quality: f64,
    /// Weight on inverse cost, `0.6 - 0.3c`
    pub cost: f64,
    /// Weight on inverse latency, `0.3 - 0.2c`
    pub latency: f64,
}

impl HybridWeights {
    /// Weights for a complexity score; out-of-range input is clamped.
    pub fn for_complexity(complexity: f64) -> Self {
        let clamped = complexity.clamp(0.0, 1.0);
        Self {
            quality: 0.5f64.mul_add(clamped, 0.1),
            cost: (-0.3f64).mul_add(clamped, 0.6),
            latency: (-0.2f64).mul_add(clamped, 0.3),
        }
    }

    /// Sum of the three weights.
    pub fn total(&self) -> f64 {
        self.quality + self.cost + self.latency
    }
}

/// How cost and latency are mapped onto `[0, 1]` before blending.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Normalization {
    /// `1 - value / ceiling`, clamped; stable across calls and registries.
    Fixed {
        /// Mean cost per one million tokens that maps to 0.0
        cost_ceiling_per_1m: f64,
        /// Latency in milliseconds that maps to 0.0
        latency_ceiling_ms: f64,
    },
    /// Min-max over the current candidate set; the best observed value maps
    /// to 1.0 and the worst to 0.0.
    MinMax,
}

impl Normalization {
    /// Checks that fixed ceilings are positive.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] for non-positive ceilings.
    pub fn validate(&self) -> Result<()> {
        if let Self::Fixed {
            cost_ceiling_per_1m,
            latency_ceiling_ms,
        } = *self
        {
            for (name, ceiling) in [
                ("cost_ceiling_per_1m", cost_ceiling_per_1m),
                ("latency_ceiling_ms", latency_ceiling_ms),
            ] {
                if !ceiling.is_finite() || ceiling <= 0.0 {
                    return Err(Error::Configuration(format!(
                        "normalization {name} must be positive, got {ceiling}"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for Normalization {
    fn default() -> Self {
        Self::Fixed {
            cost_ceiling_per_1m: 20.0,
            latency_ceiling_ms: 10_000.0,
        }
    }
}

/// Maps a raw "lower is better" metric onto `[0, 1]`, higher is better.
#[derive(Debug, Clone, Copy)]
enum Scale {
    Ceiling(f64),
    Observed { min: f64, max: f64 },
}

impl Scale {
    fn observed<I: Iterator<Item = f64>>(values: I) -> Self {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), value| {
            (low.min(value), high.max(value))
        });
        Self::Observed { min, max }
    }

    fn inverse(self, value: f64) -> f64 {
        match self {
            Self::Ceiling(ceiling) => (1.0 - value / ceiling).clamp(0.0, 1.0),
            Self::Observed { min, max } => {
                let spread = max - min;
                if !spread.is_finite() || spread <= DEGENERATE_SPREAD {
                    1.0
                } else {
                    ((max - value) / spread).clamp(0.0, 1.0)
                }
            }
        }
    }
}

/// Per-call normalizer for cost and latency.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Normalizer {
    cost: Scale,
    latency: Scale,
}

impl Normalizer {
    pub(crate) fn new(normalization: Normalization, candidates: &[&ModelMetadata]) -> Self {
        match normalization {
            Normalization::Fixed {
                cost_ceiling_per_1m,
                latency_ceiling_ms,
            } => Self {
                cost: Scale::Ceiling(cost_ceiling_per_1m),
                latency: Scale::Ceiling(latency_ceiling_ms),
            },
            Normalization::MinMax => Self {
                cost: Scale::observed(candidates.iter().map(|model| model.mean_cost_per_1m())),
                latency: Scale::observed(candidates.iter().map(|model| model.avg_latency_ms)),
            },
        }
    }

    /// Inverse cost in `[0, 1]`, 1.0 is cheapest.
    pub(crate) fn inverse_cost(&self, model: &ModelMetadata) -> f64 {
        self.cost.inverse(model.mean_cost_per_1m())
    }

    /// Inverse latency in `[0, 1]`, 1.0 is fastest.
    pub(crate) fn inverse_latency(&self, model: &ModelMetadata) -> f64 {
        self.latency.inverse(model.avg_latency_ms)
    }
}

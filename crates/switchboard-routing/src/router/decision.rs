use crate::analyzer::ComplexityScore;
use crate::scorer::ScoredCandidate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use switchboard_core::{ExtractionMode, ModelKey, Strategy};

/// Objective a decision was scored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RoutingObjective {
    /// Conversation routing under a strategy
    Strategy(Strategy),
    /// Document extraction under a mode
    Extraction(ExtractionMode),
}

impl Display for RoutingObjective {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Strategy(strategy) => write!(f, "strategy:{strategy}"),
            Self::Extraction(mode) => write!(f, "extraction:{}", mode.as_str()),
        }
    }
}

/// Outcome of a routing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Model that should serve the request
    pub selected: ModelKey,
    /// Strategy or extraction mode used for scoring
    pub objective: RoutingObjective,
    /// Complexity score the scores were computed with
    pub complexity: ComplexityScore,
    /// Every surviving candidate, best first
    pub trace: Vec<ScoredCandidate>,
}

impl RoutingDecision {
    /// Score of the selected model.
    pub fn score(&self) -> f64 {
        self.trace
            .first()
            .map_or(f64::NEG_INFINITY, |candidate| candidate.score)
    }

    /// Ranked keys after the selected one.
    pub fn alternatives(&self) -> impl Iterator<Item = &ModelKey> {
        self.trace.iter().skip(1).map(|candidate| &candidate.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision() -> RoutingDecision {
        RoutingDecision {
            selected: ModelKey::new("alpha", "a1"),
            objective: RoutingObjective::Strategy(Strategy::Hybrid),
            complexity: 0.25,
            trace: vec![
                ScoredCandidate {
                    key: ModelKey::new("alpha", "a1"),
                    score: 0.9,
                },
                ScoredCandidate {
                    key: ModelKey::new("beta", "b1"),
                    score: 0.7,
                },
            ],
        }
    }

    #[test]
    fn test_score_and_alternatives() {
        let decision = decision();
        assert!((decision.score() - 0.9).abs() < f64::EPSILON);
        let rest: Vec<String> = decision.alternatives().map(ToString::to_string).collect();
        assert_eq!(rest, vec!["beta/b1"]);
    }

    #[test]
    fn test_objective_display() {
        assert_eq!(
            RoutingObjective::Strategy(Strategy::Cost).to_string(),
            "strategy:cost"
        );
        assert_eq!(
            RoutingObjective::Extraction(ExtractionMode::Errors).to_string(),
            "extraction:errors"
        );
    }

    #[test]
    fn test_decision_serializes_to_json() {
        let json = match serde_json::to_value(decision()) {
            Ok(value) => value,
            Err(error) => panic!("serialize failed: {error}"),
        };
        assert_eq!(json["selected"]["provider"], "alpha");
        assert_eq!(json["objective"]["kind"], "strategy");
        assert_eq!(json["objective"]["value"], "hybrid");
        assert_eq!(json["trace"][1]["key"]["model"], "b1");
    }
}

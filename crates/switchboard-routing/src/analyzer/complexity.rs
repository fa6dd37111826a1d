use super::config::AnalyzerConfig;
use super::ComplexityScore;
use regex::{Regex, escape};
use serde::Serialize;
use switchboard_core::{Error, Message, Result, Role};
use tracing::debug;

const CODE_FENCE: &str = "```";
const CODE_PUNCTUATION: [&str; 7] = ["::", "->", "=>", "()", "{", "}", ";"];

/// Per-factor sub-scores, each in `[0, 1]`, and their weighted total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ComplexityBreakdown {
    /// Reasoning vocabulary sub-score
    pub reasoning: f64,
    /// Conversation length sub-score
    pub length: f64,
    /// Code and technical markup sub-score
    pub code: f64,
    /// Conversation depth sub-score
    pub depth: f64,
    /// Mathematical notation sub-score
    pub math: f64,
    /// Weighted sum, clamped to `[0, 1]`
    pub total: ComplexityScore,
}

/// Estimates how demanding a conversation is.
///
/// Stateless after construction; safe to share across threads.
#[derive(Debug, Clone)]
pub struct ComplexityAnalyzer {
    config: AnalyzerConfig,
    reasoning_keywords: Vec<Regex>,
    technical_terms: Vec<String>,
    math_patterns: Vec<Regex>,
}

impl ComplexityAnalyzer {
    /// Creates an analyzer from configuration.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if the configuration is invalid or a
    /// math pattern fails to compile.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let math_patterns = config
            .math_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|error| {
                    Error::Configuration(format!("invalid math pattern '{pattern}': {error}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let reasoning_keywords = config
            .reasoning_keywords
            .iter()
            .map(String::as_str)
            .map(word_pattern)
            .collect::<Result<Vec<_>>>()?;
        let technical_terms = lowercase_all(&config.technical_terms);

        Ok(Self {
            config,
            reasoning_keywords,
            technical_terms,
            math_patterns,
        })
    }

    /// Creates an analyzer with the default tables.
    ///
    /// # Errors
    /// Returns an error only if the built-in tables are invalid.
    pub fn with_defaults() -> Result<Self> {
        Self::new(AnalyzerConfig::default())
    }

    /// Active configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Complexity score in `[0, 1]`; an empty conversation scores `0.0`.
    pub fn analyze(&self, conversation: &[Message]) -> ComplexityScore {
        self.breakdown(conversation).total
    }

    /// Computes every factor independently.
    pub fn breakdown(&self, conversation: &[Message]) -> ComplexityBreakdown {
        if conversation.is_empty() {
            return ComplexityBreakdown::default();
        }

        let text = conversation
            .iter()
            .map(|message| message.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let lowered = text.to_lowercase();
        let characters: usize = conversation
            .iter()
            .map(|message| message.content.chars().count())
            .sum();
        // System prompts are not turns.
        let turns = conversation
            .iter()
            .filter(|message| message.role != Role::System)
            .count();

        let reasoning = self.score_reasoning(&lowered);
        let length = ratio(characters, self.config.reference_length);
        let code = self.score_code(&text);
        let depth = ratio(turns, self.config.reference_depth);
        let math = self.score_math(&lowered);

        let weights = self.config.weights;
        let total = (weights.reasoning * reasoning
            + weights.length * length
            + weights.code * code
            + weights.depth * depth
            + weights.math * math)
            .clamp(0.0, 1.0);

        let breakdown = ComplexityBreakdown {
            reasoning,
            length,
            code,
            depth,
            math,
            total,
        };
        debug!(?breakdown, "Analyzed conversation complexity");
        breakdown
    }

    fn score_reasoning(&self, lowered: &str) -> f64 {
        let matched = self
            .reasoning_keywords
            .iter()
            .filter(|keyword| keyword.is_match(lowered))
            .count();
        ratio(matched, self.config.keyword_saturation)
    }

    fn score_code(&self, text: &str) -> f64 {
        if text.contains(CODE_FENCE) {
            return 1.0;
        }

        let mut words = 0_usize;
        let mut technical = 0_usize;
        for word in text.split_whitespace() {
            words += 1;
            if self.is_technical_token(word) {
                technical += 1;
            }
        }
        if words == 0 {
            return 0.0;
        }

        let density = technical as f64 / words as f64;
        (density / self.config.technical_density_reference).min(1.0)
    }

    fn is_technical_token(&self, word: &str) -> bool {
        if CODE_PUNCTUATION.iter().any(|marker| word.contains(marker)) {
            return true;
        }

        let trimmed = word.trim_matches(|letter: char| !letter.is_alphanumeric() && letter != '_');
        if is_snake_case(trimmed) || is_camel_case(trimmed) {
            return true;
        }

        let lowered = trimmed.to_lowercase();
        self.technical_terms.iter().any(|term| *term == lowered)
    }

    fn score_math(&self, lowered: &str) -> f64 {
        let matches: usize = self
            .math_patterns
            .iter()
            .map(|pattern| pattern.find_iter(lowered).count())
            .sum();
        ratio(matches, self.config.math_saturation)
    }
}

/// `count / reference`, saturating at 1.0.
fn ratio(count: usize, reference: usize) -> f64 {
    if reference == 0 {
        return 0.0;
    }
    (count as f64 / reference as f64).min(1.0)
}

/// Case-insensitive whole-word matcher for a keyword or phrase.
fn word_pattern(keyword: &str) -> Result<Regex> {
    let pattern = format!(r"\b{}\b", escape(&keyword.to_lowercase()));
    Regex::new(&pattern).map_err(|error| {
        Error::Configuration(format!("invalid reasoning keyword '{keyword}': {error}"))
    })
}

fn lowercase_all(values: &[String]) -> Vec<String> {
    values.iter().map(|value| value.to_lowercase()).collect()
}

/// `parse_config`, `MAX_RETRIES`; rejects a bare `_` or leading/trailing underscores.
fn is_snake_case(word: &str) -> bool {
    word.len() > 2
        && word.contains('_')
        && !word.starts_with('_')
        && !word.ends_with('_')
        && word
            .chars()
            .all(|letter| letter.is_ascii_alphanumeric() || letter == '_')
}

/// `parseConfig`, `HttpClient`: a lowercase letter directly followed by an uppercase one.
fn is_camel_case(word: &str) -> bool {
    word.chars().all(|letter| letter.is_ascii_alphanumeric())
        && word
            .chars()
            .zip(word.chars().skip(1))
            .any(|(current, next)| current.is_ascii_lowercase() && next.is_ascii_uppercase())
}

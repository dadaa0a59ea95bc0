//! Sentiment scoring: two independent lexical signals fused into one label.
//!
//! The compound score comes from a rule-based intensity method, the polarity
//! from a plain averaged-lexicon method. The label is a function of the
//! polarity sign alone; the compound is reported alongside but never
//! consulted. That asymmetry is inherited behavior and kept on purpose.

mod intensity;
mod lexicon;
mod polarity;

pub use intensity::RuleIntensity;
pub use polarity::LexicalPolarity;

use parlance_stt::Transcript;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Component scores of the intensity method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    /// Aggregate intensity-weighted score in [-1, 1].
    pub compound: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Sad,
    Neutral,
}

impl SentimentLabel {
    /// Deterministic, total mapping from polarity alone.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Self::Positive
        } else if polarity < 0.0 {
            Self::Sad
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Sad => "Sad",
            Self::Neutral => "Neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub scores: IntensityScores,
    /// Aggregate polarity in [-1, 1] from the general lexical method.
    pub polarity: f64,
    pub label: SentimentLabel,
}

/// Lexicon-and-rule intensity capability.
pub trait IntensityAnalyzer: Send + Sync {
    fn polarity_scores(&self, text: &str) -> IntensityScores;
}

/// General lexical polarity capability.
pub trait PolarityAnalyzer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// Fuses the two signals. Pure and stateless: no I/O, no failure mode,
/// sentinel transcripts are scored through the same path as real text.
pub struct SentimentScorer {
    intensity: Box<dyn IntensityAnalyzer>,
    polarity: Box<dyn PolarityAnalyzer>,
}

impl SentimentScorer {
    pub fn new(
        intensity: impl IntensityAnalyzer + 'static,
        polarity: impl PolarityAnalyzer + 'static,
    ) -> Self {
        Self {
            intensity: Box::new(intensity),
            polarity: Box::new(polarity),
        }
    }

    /// Process-wide scorer built from the default analyzers, constructed
    /// once and shared by reference.
    pub fn shared() -> &'static SentimentScorer {
        static SCORER: OnceLock<SentimentScorer> = OnceLock::new();
        SCORER.get_or_init(|| SentimentScorer::new(RuleIntensity, LexicalPolarity))
    }

    pub fn score(&self, transcript: &Transcript) -> SentimentResult {
        let scores = self.intensity.polarity_scores(&transcript.text);
        let polarity = self.polarity.polarity(&transcript.text);
        let label = SentimentLabel::from_polarity(polarity);
        tracing::trace!(compound = scores.compound, polarity, label = label.as_str(), "scored");
        SentimentResult {
            scores,
            polarity,
            label,
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(RuleIntensity, LexicalPolarity)
    }
}

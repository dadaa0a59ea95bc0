//! Lexicon-and-rule intensity analyzer tuned for short informal text.

use crate::lexicon::{intensity_valence, tokenize, BOOSTERS, NEGATORS};
use crate::{IntensityAnalyzer, IntensityScores};

/// Normalization constant for the compound score.
const ALPHA: f64 = 15.0;
/// Valence added by a preceding booster word.
const BOOST_INCR: f64 = 0.293;
/// Scalar applied when a negator precedes a scored word.
const NEGATION_SCALAR: f64 = -0.74;
/// Amplification per trailing exclamation mark.
const EXCLAMATION_INCR: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
/// How many preceding tokens are checked for a negator.
const NEGATION_WINDOW: usize = 3;

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

/// Rule-based analyzer: lexicon valences adjusted for negation, boosters and
/// exclamation emphasis, normalized into a [-1, 1] compound score.
#[derive(Debug, Default)]
pub struct RuleIntensity;

impl IntensityAnalyzer for RuleIntensity {
    fn polarity_scores(&self, text: &str) -> IntensityScores {
        let tokens = tokenize(text);

        let mut sum = 0.0f64;
        let mut pos_sum = 0.0f64;
        let mut neg_sum = 0.0f64;
        let mut neu_count = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            let Some(mut valence) = intensity_valence(token) else {
                if !NEGATORS.contains(&token.as_str()) && !BOOSTERS.contains(&token.as_str()) {
                    neu_count += 1;
                }
                continue;
            };

            if i > 0 && BOOSTERS.contains(&tokens[i - 1].as_str()) {
                valence += BOOST_INCR * valence.signum();
            }

            let negated = tokens[i.saturating_sub(NEGATION_WINDOW)..i]
                .iter()
                .any(|t| NEGATORS.contains(&t.as_str()));
            if negated {
                valence *= NEGATION_SCALAR;
            }

            sum += valence;
            if valence > 0.0 {
                pos_sum += valence + 1.0;
            } else if valence < 0.0 {
                neg_sum += valence - 1.0;
            } else {
                neu_count += 1;
            }
        }

        let exclamations = text.chars().filter(|c| *c == '!').count().min(MAX_EXCLAMATIONS);
        if sum != 0.0 && exclamations > 0 {
            sum += exclamations as f64 * EXCLAMATION_INCR * sum.signum();
        }

        let total = pos_sum + neg_sum.abs() + neu_count as f64;
        let (neg, neu, pos) = if total > 0.0 {
            (
                neg_sum.abs() / total,
                neu_count as f64 / total,
                pos_sum / total,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        IntensityScores {
            neg: (neg * 1000.0).round() / 1000.0,
            neu: (neu * 1000.0).round() / 1000.0,
            pos: (pos * 1000.0).round() / 1000.0,
            compound: (normalize(sum) * 10000.0).round() / 10000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(text: &str) -> f64 {
        RuleIntensity.polarity_scores(text).compound
    }

    #[test]
    fn positive_and_negative_text_diverge() {
        assert!(compound("what a great wonderful day") > 0.5);
        assert!(compound("this is a horrible terrible mess") < -0.5);
        assert_eq!(compound("the table has four legs"), 0.0);
    }

    #[test]
    fn negation_flips_the_signal() {
        assert!(compound("not good at all") < 0.0);
        assert!(compound("this is not terrible") > 0.0);
    }

    #[test]
    fn boosters_and_exclamations_amplify() {
        assert!(compound("very good") > compound("good"));
        assert!(compound("good!!") > compound("good"));
        // Amplification caps out.
        assert_eq!(compound("good!!!!"), compound("good!!!!!!!!"));
    }

    #[test]
    fn component_scores_are_proportions() {
        let scores = RuleIntensity.polarity_scores("good movie but awful ending");
        assert!(scores.pos > 0.0);
        assert!(scores.neg > 0.0);
        assert!(scores.neu > 0.0);
        let total = scores.pos + scores.neg + scores.neu;
        assert!((total - 1.0).abs() < 0.01);
    }

    #[test]
    fn empty_text_scores_zero() {
        let scores = RuleIntensity.polarity_scores("");
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.pos, 0.0);
    }
}

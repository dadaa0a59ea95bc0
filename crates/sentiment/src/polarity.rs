//! General-purpose lexical polarity: averaged word polarities with simple
//! negation handling.

use crate::lexicon::{tokenize, word_polarity, NEGATORS};
use crate::PolarityAnalyzer;

/// Scalar applied to a word polarity when a negator immediately precedes it.
const NEGATION_SCALAR: f64 = -0.5;
const NEGATION_WINDOW: usize = 2;

#[derive(Debug, Default)]
pub struct LexicalPolarity;

impl PolarityAnalyzer for LexicalPolarity {
    fn polarity(&self, text: &str) -> f64 {
        let tokens = tokenize(text);

        let mut sum = 0.0f64;
        let mut matched = 0usize;
        for (i, token) in tokens.iter().enumerate() {
            let Some(mut p) = word_polarity(token) else {
                continue;
            };
            let negated = tokens[i.saturating_sub(NEGATION_WINDOW)..i]
                .iter()
                .any(|t| NEGATORS.contains(&t.as_str()));
            if negated {
                p *= NEGATION_SCALAR;
            }
            sum += p;
            matched += 1;
        }

        if matched == 0 {
            return 0.0;
        }
        (sum / matched as f64).clamp(-1.0, 1.0)
    }
}

//! Embedded lexicons for the two scoring methods.
//!
//! The intensity table carries valences on the [-4, 4] scale used by
//! rule-based intensity analyzers; the polarity table carries plain
//! [-1, 1] word polarities. The two methods are independent signals, so
//! they deliberately keep separate tables with different coverage.

/// Word valences for the intensity analyzer, [-4, 4].
pub const INTENSITY_LEXICON: &[(&str, f64)] = &[
    ("amazing", 2.8),
    ("angry", -2.3),
    ("annoyed", -1.8),
    ("annoying", -2.0),
    ("awesome", 3.1),
    ("awful", -2.9),
    ("bad", -2.5),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("bored", -1.4),
    ("boring", -1.7),
    ("broke", -1.6),
    ("broken", -1.8),
    ("calm", 1.3),
    ("cheerful", 2.5),
    ("comfortable", 1.7),
    ("confused", -1.2),
    ("cool", 1.9),
    ("crap", -2.4),
    ("crash", -1.8),
    ("cried", -2.1),
    ("cry", -2.0),
    ("damn", -1.6),
    ("dead", -2.9),
    ("delighted", 2.9),
    ("depressed", -2.8),
    ("disappointed", -2.2),
    ("disappointing", -2.1),
    ("disaster", -3.1),
    ("dreadful", -2.8),
    ("easy", 1.5),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("error", -1.7),
    ("evil", -3.0),
    ("excellent", 3.2),
    ("excited", 2.4),
    ("exciting", 2.3),
    ("fail", -2.3),
    ("failed", -2.4),
    ("failure", -2.5),
    ("fantastic", 3.0),
    ("fear", -2.2),
    ("fine", 1.1),
    ("fun", 2.3),
    ("funny", 1.9),
    ("glad", 2.1),
    ("good", 1.9),
    ("grateful", 2.4),
    ("great", 3.1),
    ("happy", 2.7),
    ("hate", -2.7),
    ("hated", -2.8),
    ("hello", 1.1),
    ("helpful", 1.8),
    ("hope", 1.9),
    ("hopeless", -2.6),
    ("horrible", -2.9),
    ("hurt", -2.1),
    ("joy", 2.8),
    ("kind", 1.8),
    ("laugh", 2.2),
    ("like", 1.5),
    ("lonely", -2.2),
    ("lose", -1.9),
    ("lost", -1.7),
    ("love", 3.2),
    ("loved", 3.0),
    ("lovely", 2.8),
    ("mad", -2.2),
    ("mess", -1.5),
    ("miserable", -2.9),
    ("miss", -1.2),
    ("nervous", -1.6),
    ("nice", 1.8),
    ("pain", -2.3),
    ("perfect", 3.0),
    ("pleasant", 2.2),
    ("pleased", 2.3),
    ("poor", -1.9),
    ("problem", -1.5),
    ("proud", 2.2),
    ("relaxed", 1.8),
    ("relieved", 1.9),
    ("sad", -2.1),
    ("scared", -2.2),
    ("sick", -1.9),
    ("smile", 2.0),
    ("sorry", -0.9),
    ("strong", 1.6),
    ("stupid", -2.4),
    ("succeed", 2.2),
    ("success", 2.4),
    ("sucks", -2.3),
    ("terrible", -2.9),
    ("terrific", 3.0),
    ("thank", 1.9),
    ("thanks", 1.9),
    ("tired", -1.3),
    ("ugly", -2.3),
    ("upset", -2.1),
    ("useless", -2.2),
    ("weak", -1.5),
    ("welcome", 1.9),
    ("win", 2.4),
    ("won", 2.5),
    ("wonderful", 2.9),
    ("worried", -1.9),
    ("worry", -1.8),
    ("worse", -2.4),
    ("worst", -3.1),
    ("wow", 2.2),
    ("wrong", -1.8),
    ("yes", 1.3),
];

/// Word polarities for the general lexical analyzer, [-1, 1].
pub const POLARITY_LEXICON: &[(&str, f64)] = &[
    ("amazing", 0.8),
    ("angry", -0.6),
    ("awesome", 0.9),
    ("awful", -0.8),
    ("bad", -0.7),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("boring", -0.5),
    ("broken", -0.4),
    ("cool", 0.35),
    ("delighted", 0.8),
    ("depressed", -0.8),
    ("disappointed", -0.6),
    ("disaster", -0.9),
    ("dreadful", -0.8),
    ("easy", 0.4),
    ("enjoy", 0.5),
    ("enjoyed", 0.5),
    ("error", -0.4),
    ("excellent", 1.0),
    ("excited", 0.6),
    ("exciting", 0.6),
    ("fail", -0.6),
    ("failed", -0.6),
    ("fantastic", 0.9),
    ("fine", 0.3),
    ("fun", 0.5),
    ("funny", 0.4),
    ("glad", 0.6),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("hate", -0.8),
    ("hello", 0.3),
    ("helpful", 0.5),
    ("horrible", -0.9),
    ("hurt", -0.6),
    ("kind", 0.5),
    ("like", 0.4),
    ("lonely", -0.6),
    ("love", 0.9),
    ("loved", 0.9),
    ("lovely", 0.8),
    ("mad", -0.6),
    ("miserable", -0.9),
    ("nice", 0.6),
    ("pain", -0.6),
    ("perfect", 1.0),
    ("pleasant", 0.6),
    ("pleased", 0.6),
    ("poor", -0.5),
    ("problem", -0.3),
    ("proud", 0.6),
    ("sad", -0.7),
    ("scared", -0.6),
    ("sick", -0.5),
    ("sorry", -0.3),
    ("stupid", -0.7),
    ("success", 0.6),
    ("terrible", -0.9),
    ("terrific", 0.9),
    ("thanks", 0.5),
    ("tired", -0.3),
    ("ugly", -0.7),
    ("upset", -0.6),
    ("useless", -0.6),
    ("wonderful", 0.9),
    ("worried", -0.5),
    ("worst", -1.0),
    ("wrong", -0.5),
];

/// Tokens that flip the polarity of nearby scored words.
pub const NEGATORS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "cannot", "can't", "won't", "don't", "doesn't",
    "didn't", "isn't", "wasn't", "aren't", "shouldn't", "wouldn't", "couldn't", "without",
];

/// Tokens that intensify the following scored word.
pub const BOOSTERS: &[&str] = &[
    "very", "really", "extremely", "incredibly", "absolutely", "totally", "so", "super",
    "completely", "utterly", "quite",
];

/// Lowercased alphanumeric tokens, apostrophes kept so contractions survive.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn intensity_valence(token: &str) -> Option<f64> {
    INTENSITY_LEXICON
        .binary_search_by(|(w, _)| w.cmp(&token))
        .ok()
        .map(|i| INTENSITY_LEXICON[i].1)
}

pub fn word_polarity(token: &str) -> Option<f64> {
    POLARITY_LEXICON
        .binary_search_by(|(w, _)| w.cmp(&token))
        .ok()
        .map(|i| POLARITY_LEXICON[i].1)
}

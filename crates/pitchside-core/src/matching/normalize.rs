//! Text normalization: maps user and reference text to a canonical
//! comparison key.

/// Tokens dropped before fuzzy comparison: interrogatives, articles,
/// prepositions, conjunctions, and filler words. Domain nouns (offside,
/// ticket, card, ...) are never in this list.
pub const STOP_WORDS: &[&str] = &[
    "who", "what", "when", "where", "why", "how", "is", "are", "was", "were",
    "do", "does", "did", "the", "a", "an", "to", "for", "with", "about", "in",
    "on", "at", "by", "of", "and", "or", "but", "if", "then", "else",
    "up", "so", "than", "too", "very", "can", "will", "just", "don", "t",
    "now", "get", "me", "my", "your", "tell", "know", "like", "please", "help",
];

/// Normalizes text to a comparison key.
///
/// Inputs under 3 whitespace-delimited tokens are only lowercased: short
/// queries can consist entirely of stop words, so stripping them would
/// destroy the query. Everything else is lowercased, stripped of ASCII
/// punctuation, and filtered through [`STOP_WORDS`].
///
/// The result may be empty (all tokens were stop words); callers treat that
/// as a valid key, not an error.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    if lowered.split_whitespace().count() < 3 {
        return lowered;
    }

    let stripped: String = lowered
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    stripped
        .split_whitespace()
        .filter(|token| !STOP_WORDS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

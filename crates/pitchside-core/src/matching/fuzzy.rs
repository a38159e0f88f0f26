//! Fuzzy similarity scorers on a 0-100 integer scale, built on
//! `strsim::normalized_levenshtein`.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

/// Plain similarity ratio between two strings, 0-100.
pub fn ratio(a: &str, b: &str) -> u32 {
    (normalized_levenshtein(a, b) * 100.0).round() as u32
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Order-insensitive similarity: tokens of each string are sorted before
/// comparison, so "offside rule" and "rule offside" score 100.
pub fn token_sort_ratio(a: &str, b: &str) -> u32 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Set-overlap similarity, tolerant of repeated and extra tokens. Compares
/// the shared-token core against each side's core-plus-remainder and takes
/// the best of the three pairings, so a query whose tokens are a subset of
/// a reference scores 100. A side with no tokens scores 0 against anything.
pub fn token_set_ratio(a: &str, b: &str) -> u32 {
    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0;
    }

    let shared = set_a.intersection(&set_b).copied().collect::<Vec<_>>().join(" ");
    let only_a = set_a.difference(&set_b).copied().collect::<Vec<_>>().join(" ");
    let only_b = set_b.difference(&set_a).copied().collect::<Vec<_>>().join(" ");

    let combined_a = join_tokens(&shared, &only_a);
    let combined_b = join_tokens(&shared, &only_b);

    ratio(&shared, &combined_a)
        .max(ratio(&shared, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn join_tokens(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{} {}", left, right),
    }
}

/// Best-aligning substring similarity: the shorter string is scored against
/// every same-length character window of the longer one and the best window
/// wins, so "rule" inside "offside rule" scores 100.
pub fn partial_ratio(a: &str, b: &str) -> u32 {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let window_len = shorter.chars().count();
    let longer_chars: Vec<char> = longer.chars().collect();
    if window_len == 0 || window_len == longer_chars.len() {
        return ratio(shorter, longer);
    }

    let mut best = 0;
    for window in longer_chars.windows(window_len) {
        let candidate: String = window.iter().collect();
        let score = ratio(shorter, &candidate);
        if score > best {
            best = score;
        }
        if best == 100 {
            break;
        }
    }
    best
}

/// Scores `query` against every corpus entry with `scorer` and returns the
/// top entry and its score. Strictly-greater updates only: on ties the
/// earliest corpus entry wins. `None` only for an empty corpus.
pub fn extract_one<'a, F>(query: &str, corpus: &'a [String], scorer: F) -> Option<(&'a str, u32)>
where
    F: Fn(&str, &str) -> u32,
{
    let mut best: Option<(&'a str, u32)> = None;
    for candidate in corpus {
        let score = scorer(query, candidate);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((candidate.as_str(), score));
        }
    }
    best
}

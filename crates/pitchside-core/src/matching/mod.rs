//! Matching pipeline: normalization, fuzzy scoring, and the reply decision.
//!
//! Built once from the knowledge base at startup, then shared read-only
//! across request handlers; every call is a pure function of the query.

mod fuzzy;
mod normalize;

pub use fuzzy::{extract_one, partial_ratio, ratio, token_set_ratio, token_sort_ratio};
pub use normalize::{normalize, STOP_WORDS};

use std::collections::HashMap;
use std::fmt;

use crate::knowledge::KnowledgeBase;

/// Minimum best-of-three score required to return a fuzzy match.
pub const ACCEPT_THRESHOLD: u32 = 60;

/// Reply when no match clears [`ACCEPT_THRESHOLD`].
pub const FALLBACK_REPLY: &str = "Sorry 😅 I couldn't understand that well. Try asking something related to football rules, tickets, or fan engagement!";

/// The knowledge base produced no reference corpus. Fatal at startup.
#[derive(Debug)]
pub struct EmptyCorpus;

impl fmt::Display for EmptyCorpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "knowledge base has no entries; refusing to serve without a corpus")
    }
}

impl std::error::Error for EmptyCorpus {}

/// Top fuzzy candidate across the three scorers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMatch {
    /// Normalized reference question that won.
    pub reference: String,
    /// Its score, 0-100.
    pub score: u32,
}

/// Finds the stored answer for a free-text question.
///
/// Owns the structures derived from the knowledge base: a map from
/// normalized question to answer, and the ordered reference corpus of
/// normalized questions the fuzzy scorers scan. Every corpus entry is a key
/// of the map.
pub struct MatchEngine {
    answers: HashMap<String, String>,
    corpus: Vec<String>,
}

impl MatchEngine {
    /// Derives the normalized map and reference corpus from `kb`.
    ///
    /// Entries are taken in sorted question order, so when two distinct
    /// questions normalize to the same key the lexicographically later one
    /// wins deterministically; the collision is logged with both originals.
    pub fn new(kb: &KnowledgeBase) -> Result<Self, EmptyCorpus> {
        let mut answers: HashMap<String, String> = HashMap::new();
        let mut origins: HashMap<String, &str> = HashMap::new();
        let mut corpus: Vec<String> = Vec::new();

        for (question, answer) in kb.sorted_entries() {
            let key = normalize(question);
            if let Some(shadowed) = origins.insert(key.clone(), question) {
                tracing::warn!(
                    normalized = %key,
                    kept = %question,
                    shadowed = %shadowed,
                    "two questions normalize to the same key; keeping the later one"
                );
                answers.insert(key, answer.to_string());
            } else {
                answers.insert(key.clone(), answer.to_string());
                corpus.push(key);
            }
        }

        if corpus.is_empty() {
            return Err(EmptyCorpus);
        }
        Ok(Self { answers, corpus })
    }

    /// Number of distinct normalized questions in the reference corpus.
    pub fn corpus_len(&self) -> usize {
        self.corpus.len()
    }

    /// Highest-scoring corpus entry across the three scorers, evaluated in
    /// fixed order: token-sort, token-set, partial. Updates are
    /// strictly-greater, so on equal scores the earlier scorer (and within a
    /// scorer, the earlier corpus entry) keeps the win.
    pub fn best_match(&self, normalized_query: &str) -> BestMatch {
        const SCORERS: [fn(&str, &str) -> u32; 3] =
            [token_sort_ratio, token_set_ratio, partial_ratio];

        let mut best: Option<BestMatch> = None;
        for scorer in SCORERS {
            if let Some((reference, score)) = extract_one(normalized_query, &self.corpus, scorer) {
                if best.as_ref().map_or(true, |b| score > b.score) {
                    best = Some(BestMatch {
                        reference: reference.to_string(),
                        score,
                    });
                }
            }
        }
        // Corpus is non-empty by construction, so every scorer produced a candidate.
        best.unwrap_or(BestMatch {
            reference: String::new(),
            score: 0,
        })
    }

    /// Answers a raw user question.
    ///
    /// Normalizes the query, takes the exact-match shortcut when the
    /// normalized query is itself a stored key (never gated by score), and
    /// otherwise returns the best fuzzy answer at or above
    /// [`ACCEPT_THRESHOLD`], or [`FALLBACK_REPLY`]. Never panics, including
    /// on empty and whitespace-only input.
    pub fn reply(&self, raw: &str) -> String {
        let query = normalize(raw);

        if let Some(answer) = self.answers.get(&query) {
            tracing::info!(query = %query, "exact match on normalized question");
            return answer.clone();
        }

        let best = self.best_match(&query);
        tracing::info!(
            best_match = %best.reference,
            score = best.score,
            "fuzzy match result"
        );

        if best.score >= ACCEPT_THRESHOLD {
            if let Some(answer) = self.answers.get(&best.reference) {
                return answer.clone();
            }
        }
        FALLBACK_REPLY.to_string()
    }
}

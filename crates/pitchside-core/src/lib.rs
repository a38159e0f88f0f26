//! pitchside-core: the library behind the Pitchside FAQ chat widget.
//!
//! Holds the shared config, the question/answer knowledge base, and the
//! matching pipeline (normalizer + fuzzy match engine) the gateway serves
//! requests with.

mod knowledge;
mod matching;
mod shared;

// Shared config
pub use shared::CoreConfig;

// Knowledge source
pub use knowledge::{KnowledgeBase, KnowledgeError, DEFAULT_KNOWLEDGE_PATH};

// Matching pipeline
pub use matching::{
    extract_one, normalize, partial_ratio, ratio, token_set_ratio, token_sort_ratio, BestMatch,
    EmptyCorpus, MatchEngine, ACCEPT_THRESHOLD, FALLBACK_REPLY, STOP_WORDS,
};

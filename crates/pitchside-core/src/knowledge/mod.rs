//! Static question/answer knowledge source, loaded once at startup and
//! read-only for the lifetime of the process.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Default location of the knowledge document.
pub const DEFAULT_KNOWLEDGE_PATH: &str = "./data/knowledge.json";

/// Failure to load the knowledge document. Fatal at startup: the service
/// must not serve traffic without a corpus.
#[derive(Debug)]
pub enum KnowledgeError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for KnowledgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnowledgeError::Io(e) => write!(f, "cannot read knowledge document: {}", e),
            KnowledgeError::Parse(e) => write!(f, "knowledge document is not a JSON object of strings: {}", e),
        }
    }
}

impl std::error::Error for KnowledgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KnowledgeError::Io(e) => Some(e),
            KnowledgeError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for KnowledgeError {
    fn from(e: std::io::Error) -> Self {
        KnowledgeError::Io(e)
    }
}

impl From<serde_json::Error> for KnowledgeError {
    fn from(e: serde_json::Error) -> Self {
        KnowledgeError::Parse(e)
    }
}

/// Mapping from question text to answer text. Keys are unique; never
/// mutated after load.
#[derive(Debug)]
pub struct KnowledgeBase {
    entries: HashMap<String, String>,
}

impl KnowledgeBase {
    /// Loads the knowledge document (a flat JSON object of question -> answer) at `path`.
    pub fn load_json_path<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeError> {
        let raw = std::fs::read_to_string(path)?;
        let entries: HashMap<String, String> = serde_json::from_str(&raw)?;
        Ok(Self { entries })
    }

    /// Builds a knowledge base from in-memory pairs.
    pub fn from_entries<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Answer for an exact original question, if stored.
    pub fn get(&self, question: &str) -> Option<&str> {
        self.entries.get(question).map(|s| s.as_str())
    }

    /// Entries in sorted question order. Derived structures iterate this so
    /// collision resolution is deterministic across runs.
    pub fn sorted_entries(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_unstable_by_key(|(k, _)| *k);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_json_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"What is the offside rule?": "A player is offside if...", "How do I buy tickets?": "Online at the club shop."}}"#
        )
        .unwrap();

        let kb = KnowledgeBase::load_json_path(file.path()).unwrap();
        assert_eq!(kb.len(), 2);
        assert_eq!(
            kb.get("What is the offside rule?"),
            Some("A player is offside if...")
        );
        assert_eq!(kb.get("unknown question"), None);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = KnowledgeBase::load_json_path("./no/such/knowledge.json").unwrap_err();
        assert!(matches!(err, KnowledgeError::Io(_)));
    }

    #[test]
    fn non_object_document_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["not", "an", "object"]"#).unwrap();

        let err = KnowledgeBase::load_json_path(file.path()).unwrap_err();
        assert!(matches!(err, KnowledgeError::Parse(_)));
    }

    #[test]
    fn sorted_entries_are_ordered_by_question() {
        let kb = KnowledgeBase::from_entries([("b", "2"), ("a", "1"), ("c", "3")]);
        let questions: Vec<&str> = kb.sorted_entries().iter().map(|(q, _)| *q).collect();
        assert_eq!(questions, vec!["a", "b", "c"]);
    }
}

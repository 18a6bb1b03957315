//! Fixed-cardinality summary.

use serde::{Deserialize, Serialize};

/// Ordered summary sentences.
///
/// The sentence count is fixed once the extractive step produces it;
/// densification replaces sentences in place and never inserts or removes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Summary {
    sentences: Vec<String>,
}

impl Summary {
    pub fn new(sentences: Vec<String>) -> Self {
        Self { sentences }
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Sentences joined by a single space.
    pub fn text(&self) -> String {
        self.sentences.join(" ")
    }

    /// Whitespace-delimited token count of [`text`](Self::text).
    pub fn word_count(&self) -> usize {
        self.sentences
            .iter()
            .map(|s| s.split_whitespace().count())
            .sum()
    }

    /// Overwrite the sentence at `position`, returning the old one.
    /// Out-of-range positions leave the summary untouched.
    pub fn replace(&mut self, position: usize, sentence: String) -> Option<String> {
        let slot = self.sentences.get_mut(position)?;
        Some(std::mem::replace(slot, sentence))
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> Summary {
        Summary::new(vec!["Bob likes cats.".into(), "Cats are independent.".into()])
    }

    #[test]
    fn test_text_and_word_count() {
        let s = summary();
        assert_eq!(s.text(), "Bob likes cats. Cats are independent.");
        assert_eq!(s.word_count(), 6);
        assert_eq!(s.word_count(), s.text().split_whitespace().count());
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut s = summary();
        let old = s.replace(1, "Alice met Bob.".into());
        assert_eq!(old.as_deref(), Some("Cats are independent."));
        assert_eq!(s.len(), 2);
        assert!(s.replace(5, "nope".into()).is_none());
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_serializes_as_list() {
        let json = serde_json::to_string(&summary()).unwrap();
        assert_eq!(json, r#"["Bob likes cats.","Cats are independent."]"#);
    }
}

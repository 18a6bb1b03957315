//! Immutable source document with its derived segmentation.

use sha2::{Digest, Sha256};

use crate::segment::{split_on_delimiter, split_sentences, tokenize_words};

/// A sentence with its position in the parent text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
}

/// Raw text plus its sentences and word tokens. Built once per request.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    sentences: Vec<Sentence>,
    tokens: Vec<String>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let sentences = split_sentences(&text)
            .into_iter()
            .enumerate()
            .map(|(index, s)| Sentence {
                index,
                text: s.to_string(),
            })
            .collect();
        let tokens = tokenize_words(&text).into_iter().map(String::from).collect();
        Self {
            text,
            sentences,
            tokens,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Sentences from the linguistic splitter, in reading order.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Raw pieces from the crude delimiter split.
    pub fn delimiter_segments(&self, delimiter: char) -> Vec<&str> {
        split_on_delimiter(&self.text, delimiter)
    }

    /// Hex-encoded SHA-256 of the raw text.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.text.as_bytes());
        hex::encode(hasher.finalize())
    }
}

//! Word-frequency table and sentence scoring.
//!
//! The table is keyed by each token's original casing while the stopword
//! and punctuation screens run on the lower-cased form. Scoring then looks
//! up lower-cased sentence tokens. So "The" and "the" may both be screened
//! yet capitalized keys such as "Discovery" never contribute to a score.
//! Selection results depend on this asymmetry.

use std::collections::HashMap;

use densify_core::StopwordSource;

use crate::segment::tokenize_words;
use crate::stopwords::is_punctuation;

/// Mapping from token surface form to its occurrence count.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Count every non-stopword, non-punctuation token of `text`.
    pub fn build(text: &str, stopwords: &dyn StopwordSource) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for token in tokenize_words(text) {
            let lower = token.to_lowercase();
            if stopwords.is_stopword(&lower) || is_punctuation(&lower) {
                continue;
            }
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.counts.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of table counts over the sentence's lower-cased tokens.
    pub fn score_sentence(&self, sentence: &str) -> usize {
        let lower = sentence.to_lowercase();
        tokenize_words(&lower)
            .into_iter()
            .filter_map(|word| self.get(word))
            .sum()
    }
}

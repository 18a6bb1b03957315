//! Bag-of-words cosine similarity.
//!
//! Both sentences are lower-cased and tokenized into words of two or more
//! word characters. Each sentence becomes a count vector over the joint
//! vocabulary and the score is the cosine of the two vectors. A sentence
//! with no tokens scores 0 against anything.

use std::collections::BTreeMap;

use densify_core::{Result, SimilarityScorer};
use ndarray::Array1;
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern compiles"));

/// Count-vector cosine scorer. Stateless; the vocabulary is rebuilt for
/// every pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct BagOfWordsScorer;

impl BagOfWordsScorer {
    pub fn new() -> Self {
        Self
    }
}

impl SimilarityScorer for BagOfWordsScorer {
    fn similarity(&self, a: &str, b: &str) -> Result<f64> {
        Ok(cosine(a, b))
    }
}

/// Cosine similarity of the two texts' count vectors, in `[0, 1]`.
pub fn cosine(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let tokens_a: Vec<&str> = TOKEN_RE.find_iter(&a).map(|m| m.as_str()).collect();
    let tokens_b: Vec<&str> = TOKEN_RE.find_iter(&b).map(|m| m.as_str()).collect();

    let mut vocab: BTreeMap<&str, usize> = BTreeMap::new();
    for token in tokens_a.iter().chain(tokens_b.iter()) {
        vocab.entry(*token).or_insert(0);
    }
    for (index, slot) in vocab.values_mut().enumerate() {
        *slot = index;
    }

    let va = count_vector(&tokens_a, &vocab);
    let vb = count_vector(&tokens_b, &vocab);

    let norm_a = va.dot(&va).sqrt();
    let norm_b = vb.dot(&vb).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (va.dot(&vb) / (norm_a * norm_b)).clamp(0.0, 1.0)
}

fn count_vector(tokens: &[&str], vocab: &BTreeMap<&str, usize>) -> Array1<f64> {
    let mut vector = Array1::<f64>::zeros(vocab.len());
    for token in tokens {
        if let Some(&index) = vocab.get(token) {
            vector[index] += 1.0;
        }
    }
    vector
}

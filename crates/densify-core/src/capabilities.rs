//! External capability contracts consumed by the densification pipeline.
//!
//! Entity recognition, sentence similarity, and the stopword list are not
//! implemented by the pipeline itself. Each is reached through one of these
//! traits so a heuristic backend, a model-backed backend, or a test stub can
//! be swapped in without touching the core.

use std::sync::Arc;

use crate::Result;

/// Returns entity surface strings for a span of text.
///
/// Mentions come back in text order with repetitions kept. Implementations
/// must be deterministic for identical input within a run.
pub trait EntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<Vec<String>>;
}

/// Scores textual similarity between two sentences.
///
/// Scores are in `[0, 1]`, higher meaning more similar. Symmetry is
/// recommended but not required.
pub trait SimilarityScorer: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> Result<f64>;
}

/// Stopword membership for a fixed language.
pub trait StopwordSource: Send + Sync {
    /// `word` is expected lower-cased by the caller.
    fn is_stopword(&self, word: &str) -> bool;
}

impl<T: EntityExtractor + ?Sized> EntityExtractor for Arc<T> {
    fn extract(&self, text: &str) -> Result<Vec<String>> {
        (**self).extract(text)
    }
}

impl<T: SimilarityScorer + ?Sized> SimilarityScorer for Arc<T> {
    fn similarity(&self, a: &str, b: &str) -> Result<f64> {
        (**self).similarity(a, b)
    }
}

impl<T: StopwordSource + ?Sized> StopwordSource for Arc<T> {
    fn is_stopword(&self, word: &str) -> bool {
        (**self).is_stopword(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<&'static str>);

    impl EntityExtractor for Fixed {
        fn extract(&self, _text: &str) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    #[test]
    fn test_arc_forwards_to_inner() {
        let shared: Arc<dyn EntityExtractor> = Arc::new(Fixed(vec!["Alice", "Bob"]));
        let entities = shared.extract("ignored").unwrap();
        assert_eq!(entities, vec!["Alice", "Bob"]);
    }
}

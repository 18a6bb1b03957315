//! Densify Infer: similarity scoring and extraction caching.
//!
//! Provides the default `SimilarityScorer` backend (bag-of-words cosine)
//! and `CachedExtractor`, which memoizes any `EntityExtractor`.

pub mod cache;
pub mod similarity;

pub use cache::{CacheStats, CachedExtractor};
pub use similarity::BagOfWordsScorer;

use std::sync::Arc;

use densify_core::SimilarityScorer;

/// Create the default similarity scorer.
pub fn create_scorer() -> Arc<dyn SimilarityScorer> {
    tracing::info!("Using bag-of-words cosine similarity");
    Arc::new(BagOfWordsScorer::new())
}

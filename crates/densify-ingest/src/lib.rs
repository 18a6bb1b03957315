//! Densify Ingest: document segmentation, frequency scoring, extractive
//! summary, heuristic entity extraction.

pub mod document;
pub mod extract;
pub mod extractive;
pub mod frequency;
pub mod segment;
pub mod stopwords;
pub mod summary;

pub use document::{Document, Sentence};
pub use extract::HeuristicExtractor;
pub use extractive::ExtractiveSummarizer;
pub use frequency::FrequencyTable;
pub use stopwords::EnglishStopwords;
pub use summary::Summary;

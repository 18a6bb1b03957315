//! Local entity extraction backends.
//!
//! The pipeline consumes entities through `densify_core::EntityExtractor`.
//! The heuristic backend here lets it run without a trained NER model.

pub mod entities;

pub use entities::{extract_mentions, HeuristicExtractor};

//! Densify Core: the shared error type, run configuration and capability traits.

pub mod capabilities;
pub mod config;
pub mod error;

pub use capabilities::{EntityExtractor, SimilarityScorer, StopwordSource};
pub use config::DensifyConfig;
pub use error::{Error, Result};

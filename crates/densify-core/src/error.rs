//! Error types for Densify.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Input the pipeline cannot work with (empty document, zero-word summary).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An external capability (entity extraction, similarity) failed or timed out.
    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the failure is local to a single iteration or entity.
    ///
    /// Recoverable errors are skipped by the runtime; everything else aborts
    /// the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::CapabilityUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

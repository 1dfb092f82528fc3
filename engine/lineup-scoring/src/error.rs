//! Error types for lineup scoring

use franchise_registry::RegistryError;
use thiserror::Error;

/// Result type alias for scoring operations
pub type Result<T> = std::result::Result<T, ScoringError>;

/// Errors raised while loading scoring inputs.
///
/// Scoring itself never fails for a well-formed lineup; these cover snapshot
/// and configuration loading only.
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot parse error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] RegistryError),
}

impl ScoringError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

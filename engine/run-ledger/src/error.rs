//! Error types for the run ledger

use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur in the run ledger
#[derive(Error, Debug)]
pub enum LedgerError {
    /// I/O errors reading or writing run files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Run record fails validation
    #[error("Invalid run record: {0}")]
    InvalidRecord(String),

    /// Run or share code already stored
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Background file task failed to complete
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new invalid record error
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Create a new already exists error
    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::AlreadyExists(msg.into())
    }
}

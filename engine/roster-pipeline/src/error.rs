//! Error types for the roster pipeline

use franchise_registry::RegistryError;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Failure of a single external fetch.
///
/// Cloneable so one in-flight result can be shared by every caller that asked
/// for the same key.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Connection, DNS or body-read failure
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// Request exceeded the per-call timeout
    #[error("Request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    /// Non-success HTTP status
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// Response body does not match the expected schema
    #[error("Malformed payload from {source_name}: {reason}")]
    MalformedPayload { source_name: String, reason: String },

    /// Every attempt failed with a transient error
    #[error("Gave up on {url} after {attempts} attempts: {last}")]
    RetriesExhausted { url: String, attempts: u32, last: String },
}

impl FetchError {
    /// Create a new malformed payload error
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPayload { source_name: source_name.into(), reason: reason.into() }
    }

    /// Whether another attempt could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport { .. } | FetchError::Timeout { .. } => true,
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::MalformedPayload { .. } | FetchError::RetriesExhausted { .. } => false,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, FetchError::MalformedPayload { .. })
    }
}

/// Errors surfaced by a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The rebuilt snapshot would not load in the scoring engine
    #[error("Invalid roster snapshot: {0}")]
    Registry(#[from] RegistryError),

    /// I/O errors reading seeds or writing the snapshot
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client construction failed
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl PipelineError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

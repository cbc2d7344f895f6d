//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur while running the filter.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while touching checkpoint, cache, or lock files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error (operator-edited input, not recoverable state).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The mail query collaborator failed or returned unusable data.
    ///
    /// When this surfaces from a run, the checkpoint and signature cache
    /// have been left untouched so the time window is not silently skipped.
    #[error("Mail source error: {0}")]
    Source(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

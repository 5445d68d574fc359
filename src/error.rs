//! Error types for formulac

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// formulac errors
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed formula text. Scoped to one formula; the registry is never
    /// touched on this path.
    #[error("Formula parse error: {formula}: {reason}")]
    Parse { formula: String, reason: String },

    /// Template failure during emission. Batch-fatal.
    #[error("Render error: {0}")]
    Render(String),

    /// Sink write failure during emission. Batch-fatal.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

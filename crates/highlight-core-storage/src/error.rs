use highlight_core::HighlightError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by storage adapters and repositories.
pub enum StorageError {
    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    /// Stored data could not be encoded or decoded.
    Json(#[from] serde_json::Error),

    #[error("invalid stored highlight: {0}")]
    /// Stored spans decoded but violated span invariants.
    Highlight(#[from] HighlightError),

    #[error("invalid storage key '{0}'")]
    /// A key contained characters the adapter cannot store safely.
    InvalidKey(String),
}

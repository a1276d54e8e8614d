//! Error types for the core crate.

use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the core data and persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A profile file could not be read or written.
    #[error("store I/O error at {path}: {source}")]
    StoreIo {
        /// Path of the backing file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Persisted state could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

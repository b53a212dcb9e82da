//! Storage error types.

use thiserror::Error;

/// Errors that can occur when reading from or writing to a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing store.
    #[error("Failed to open store: {0}")]
    Open(String),

    /// Filesystem I/O failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend rejected the operation.
    #[error("Store operation failed: {0}")]
    Store(String),

    /// The key cannot be represented by this backend.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

impl StorageError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

use std::{io, path::Path};

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends when the score book cannot be persisted.
///
/// Read-side failures are deliberately absent: a missing or corrupt book
/// degrades to an empty one instead of erroring.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The document or its parent directory could not be written.
    #[error("writing score store at {path}: {source}")]
    Write {
        /// Path of the store document.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The score book could not be serialized to JSON.
    #[error("encoding score store: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    /// Construct a write error annotated with the offending path.
    pub fn write(path: &Path, source: io::Error) -> Self {
        StorageError::Write {
            path: path.display().to_string(),
            source,
        }
    }
}

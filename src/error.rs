//! Error types for the storage layer.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or writing the persisted task blob.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialise task store: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
}

impl StorageError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

//! Storage errors for preference backends.
//!
//! These never escape the public store or registry API: callers see a
//! default value and the error is logged.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Corrupt value for key '{key}': {message}")]
    Corrupt { key: String, message: String },
}

impl StorageError {
    pub fn corrupt(key: impl Into<String>, message: impl Into<String>) -> Self {
        StorageError::Corrupt {
            key: key.into(),
            message: message.into(),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

//! Storage abstraction trait
//!
//! This module defines the `BlobStore` trait the output encoder publishes through.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result of a best-effort upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The object was written; the value is its public URL
    Uploaded(String),
    /// Nothing usable was written (store disabled or upload failed)
    Skipped,
}

impl UploadOutcome {
    pub fn url(&self) -> Option<&str> {
        match self {
            UploadOutcome::Uploaded(url) => Some(url),
            UploadOutcome::Skipped => None,
        }
    }
}

/// Remote object store abstraction
///
/// `upload` is safe to call unconditionally: a disabled store returns
/// `Skipped` immediately without any network I/O.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Whether uploads can be attempted at all
    fn is_enabled(&self) -> bool;

    /// Upload `data` under `key` and return the object's public URL
    async fn upload(&self, data: Bytes, key: &str) -> UploadOutcome;
}

//! Shared key generation for storage backends.
//!
//! Key format: `{job_id}/{file_name}`.

use crate::traits::{StorageError, StorageResult};

/// Generate the storage key for an output file of a job.
pub fn output_key(job_id: &str, file_name: &str) -> String {
    format!("{}/{}", job_id, file_name)
}

/// Reject keys that are empty, absolute or contain `..`.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if key.contains("..") || key.starts_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid characters: {}",
            key
        )));
    }
    Ok(())
}

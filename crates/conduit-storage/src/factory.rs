#[cfg(feature = "storage-s3")]
use crate::S3Store;
use crate::{BlobStore, StorageResult, UploadOutcome};
use async_trait::async_trait;
use bytes::Bytes;
use conduit_core::StoreConfig;
use std::sync::Arc;

/// Store used when uploads are not configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStore;

#[async_trait]
impl BlobStore for DisabledStore {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn upload(&self, _data: Bytes, _key: &str) -> UploadOutcome {
        UploadOutcome::Skipped
    }
}

/// Create the object store client for one job based on configuration
pub fn create_store(config: &StoreConfig) -> StorageResult<Arc<dyn BlobStore>> {
    if !config.is_enabled() {
        tracing::info!("Object storage disabled, missing endpoint or credentials");
        return Ok(Arc::new(DisabledStore));
    }

    #[cfg(feature = "storage-s3")]
    {
        let store = S3Store::from_config(config)?;
        tracing::info!(
            bucket = %config.bucket_name(),
            region = %config.region(),
            "Object storage enabled"
        );
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "storage-s3"))]
    Err(crate::StorageError::ConfigError(
        "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
    ))
}

use crate::keys::validate_key;
use crate::traits::{BlobStore, StorageError, StorageResult, UploadOutcome};
use async_trait::async_trait;
use bytes::Bytes;
use conduit_core::constants::OUTPUT_CONTENT_TYPE;
use conduit_core::StoreConfig;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectStore, PutOptions, PutPayload, RetryConfig,
};
use std::sync::Arc;

/// Connected client state, present only when the store is enabled
#[derive(Clone)]
struct Bucket {
    store: Arc<dyn ObjectStore>,
    endpoint_url: String,
    bucket: String,
}

/// S3-compatible object store client
///
/// Built from a `StoreConfig`. When the configuration lacks the endpoint or
/// credentials the client is disabled and every upload is skipped.
#[derive(Clone)]
pub struct S3Store {
    bucket: Option<Bucket>,
}

impl S3Store {
    /// Create a new S3Store from configuration
    ///
    /// Requests are path-style (`{endpoint}/{bucket}/{key}`), which works for AWS
    /// as well as MinIO, R2 and other S3-compatible providers. Uploads are not
    /// retried.
    pub fn from_config(config: &StoreConfig) -> StorageResult<Self> {
        let (Some(endpoint), Some(access_key), Some(secret_key)) = (
            config.endpoint_url.as_ref(),
            config.access_key_id.as_ref(),
            config.secret_access_key.as_ref(),
        ) else {
            return Ok(Self::disabled());
        };

        let store = AmazonS3Builder::new()
            .with_endpoint(endpoint.clone())
            .with_allow_http(endpoint.starts_with("http://"))
            .with_virtual_hosted_style_request(false)
            .with_access_key_id(access_key.clone())
            .with_secret_access_key(secret_key.clone())
            .with_region(config.region.clone())
            .with_bucket_name(config.bucket_name.clone())
            .with_retry(RetryConfig {
                max_retries: 0,
                ..Default::default()
            })
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::with_store(
            Arc::new(store),
            endpoint.clone(),
            config.bucket_name.clone(),
        ))
    }

    /// A client that never uploads
    pub fn disabled() -> Self {
        S3Store { bucket: None }
    }

    /// Wrap an already built object store
    ///
    /// `endpoint_url` and `bucket` are only used to derive public URLs.
    pub fn with_store(
        store: Arc<dyn ObjectStore>,
        endpoint_url: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        S3Store {
            bucket: Some(Bucket {
                store,
                endpoint_url: endpoint_url.into(),
                bucket: bucket.into(),
            }),
        }
    }

    /// Generate public URL for an object: `{endpoint}/{bucket}/{key}`
    fn generate_url(bucket: &Bucket, key: &str) -> String {
        let base_url = bucket.endpoint_url.trim_end_matches('/');
        format!("{}/{}/{}", base_url, bucket.bucket, key)
    }

    async fn put(bucket: &Bucket, data: Bytes, key: &str) -> StorageResult<String> {
        validate_key(key)?;

        let size = data.len() as u64;
        let location = Path::from(key);
        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(OUTPUT_CONTENT_TYPE),
        );
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let start = std::time::Instant::now();

        bucket
            .store
            .put_opts(&location, PutPayload::from(data), options)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket.bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        let url = Self::generate_url(bucket, key);

        tracing::info!(
            bucket = %bucket.bucket,
            key = %key,
            url = %url,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(url)
    }
}

#[async_trait]
impl BlobStore for S3Store {
    fn is_enabled(&self) -> bool {
        self.bucket.is_some()
    }

    async fn upload(&self, data: Bytes, key: &str) -> UploadOutcome {
        let Some(bucket) = self.bucket.as_ref() else {
            return UploadOutcome::Skipped;
        };

        match Self::put(bucket, data, key).await {
            Ok(url) => UploadOutcome::Uploaded(url),
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Upload skipped");
                UploadOutcome::Skipped
            }
        }
    }
}

//! Output encoding
//!
//! Publishes the pipeline's output file to the object store when possible and
//! falls back to inline base64 otherwise. Never returns an error: failures are
//! reported as an `error` payload.

use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use conduit_core::constants::OUTPUT_NOT_FOUND_MESSAGE;
use conduit_core::OutputPayload;
use conduit_storage::{output_key, BlobStore, UploadOutcome};
use std::path::Path;
use std::sync::Arc;

const DEFAULT_OUTPUT_NAME: &str = "output.png";

pub struct OutputEncoder {
    store: Arc<dyn BlobStore>,
}

impl OutputEncoder {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self), fields(path = %output_path.display()))]
    pub async fn process(&self, output_path: &Path, job_id: &str) -> OutputPayload {
        if !tokio::fs::try_exists(output_path).await.unwrap_or(false) {
            tracing::error!("Output file not found");
            return OutputPayload::Error(OUTPUT_NOT_FOUND_MESSAGE.to_string());
        }

        let data = match tokio::fs::read(output_path).await {
            Ok(data) => Bytes::from(data),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read output file");
                return OutputPayload::Error(format!("Failed to read output file: {}", e));
            }
        };

        if self.store.is_enabled() {
            let file_name = output_path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(DEFAULT_OUTPUT_NAME);
            let key = output_key(job_id, file_name);

            match self.store.upload(data.clone(), &key).await {
                UploadOutcome::Uploaded(url) => return OutputPayload::StoreUrl(url),
                UploadOutcome::Skipped => {
                    tracing::warn!(key = %key, "Upload failed, falling back to base64");
                }
            }
        }

        tracing::info!(size_bytes = data.len(), "Returning output as base64");
        OutputPayload::Base64(general_purpose::STANDARD.encode(&data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use conduit_storage::DisabledStore;
    use std::sync::Mutex;

    /// Records every upload and answers with a fixed outcome
    struct RecordingStore {
        succeed: bool,
        uploads: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl RecordingStore {
        fn new(succeed: bool) -> Arc<Self> {
            Arc::new(Self {
                succeed,
                uploads: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl BlobStore for RecordingStore {
        fn is_enabled(&self) -> bool {
            true
        }

        async fn upload(&self, data: Bytes, key: &str) -> UploadOutcome {
            self.uploads
                .lock()
                .unwrap()
                .push((key.to_string(), data.to_vec()));
            if self.succeed {
                UploadOutcome::Uploaded(format!("http://store/bucket/{}", key))
            } else {
                UploadOutcome::Skipped
            }
        }
    }

    fn write_output(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[tokio::test]
    async fn test_missing_file_is_error_payload() {
        let store = RecordingStore::new(true);
        let encoder = OutputEncoder::new(store.clone());

        let payload = encoder
            .process(Path::new("/nonexistent/dir/out.png"), "j1")
            .await;

        assert_eq!(payload, OutputPayload::Error("Output file not found".to_string()));
        assert!(store.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_store_returns_base64() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_output(&dir, "out.png", &[0, 1, 2, 3]);
        let encoder = OutputEncoder::new(Arc::new(DisabledStore));

        let payload = encoder.process(&path, "j1").await;

        assert_eq!(payload, OutputPayload::Base64("AAECAw==".to_string()));
    }

    #[tokio::test]
    async fn test_successful_upload_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_output(&dir, "ComfyUI_00001_.png", b"png");
        let store = RecordingStore::new(true);
        let encoder = OutputEncoder::new(store.clone());

        let payload = encoder.process(&path, "j42").await;

        assert_eq!(
            payload,
            OutputPayload::StoreUrl("http://store/bucket/j42/ComfyUI_00001_.png".to_string())
        );
        let uploads = store.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0, "j42/ComfyUI_00001_.png");
        assert_eq!(uploads[0].1, b"png".to_vec());
    }

    #[tokio::test]
    async fn test_failed_upload_falls_back_to_base64() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_output(&dir, "out.png", &[0xff]);
        let store = RecordingStore::new(false);
        let encoder = OutputEncoder::new(store.clone());

        let payload = encoder.process(&path, "j1").await;

        assert_eq!(payload, OutputPayload::Base64("/w==".to_string()));
        assert_eq!(store.uploads.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_path_is_error_payload() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = OutputEncoder::new(Arc::new(DisabledStore));

        // A directory exists but cannot be read as a file
        let payload = encoder.process(dir.path(), "j1").await;

        assert!(payload.is_error());
        assert_ne!(payload.data(), "Output file not found");
    }
}

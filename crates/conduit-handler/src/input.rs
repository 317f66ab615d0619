//! Input decoding
//!
//! Dispatches on the declared input kind, acquires the raw bytes and writes them
//! to `{input_dir}/{job_id}_input.png` for the pipeline to read.
//!
//! The file name depends only on the job id: two concurrent jobs sharing an id
//! overwrite each other's input. Callers must keep job ids unique.

use base64::{engine::general_purpose, Engine as _};
use conduit_core::constants::INPUT_FILE_SUFFIX;
use conduit_core::{AdapterConfig, InputKind, InputSpec};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::error::InputError;

pub struct InputDecoder {
    input_dir: PathBuf,
    http_client: reqwest::Client,
}

impl InputDecoder {
    pub fn new(input_dir: impl Into<PathBuf>, fetch_timeout: Duration) -> Result<Self, InputError> {
        let http_client = reqwest::Client::builder().timeout(fetch_timeout).build()?;

        Ok(Self {
            input_dir: input_dir.into(),
            http_client,
        })
    }

    pub fn from_config(config: &AdapterConfig) -> Result<Self, InputError> {
        Self::new(config.input_dir.clone(), config.fetch_timeout)
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Path the decoded input of `job_id` is written to.
    pub fn input_path(&self, job_id: &str) -> PathBuf {
        self.input_dir.join(format!("{}{}", job_id, INPUT_FILE_SUFFIX))
    }

    /// Decode `spec` and write the bytes to the job's input file.
    ///
    /// Every failure is logged here; nothing is written unless the bytes were
    /// acquired successfully.
    #[tracing::instrument(skip(self, spec), fields(input_type = %spec.kind_label()))]
    pub async fn process(&self, spec: &InputSpec, job_id: &str) -> Result<PathBuf, InputError> {
        match self.try_process(spec, job_id).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Image saved");
                Ok(path)
            }
            Err(e) => {
                tracing::error!(error = %e, "Input processing failed");
                Err(e)
            }
        }
    }

    async fn try_process(&self, spec: &InputSpec, job_id: &str) -> Result<PathBuf, InputError> {
        let payload = spec.payload().ok_or(InputError::MissingPayload)?;
        validate_job_id(job_id)?;

        let kind = spec
            .kind()
            .map_err(|_| InputError::UnknownKind(spec.kind_label()))?;
        let payload = payload
            .as_str()
            .ok_or_else(|| InputError::InvalidPayload(payload.to_string()))?;

        let image_bytes = if kind.is_remote() {
            tracing::info!(url = %payload, "Fetching image from {}", kind);
            self.fetch_url(payload).await?
        } else {
            tracing::info!("Processing base64-encoded image");
            decode_base64(payload)?
        };

        fs::create_dir_all(&self.input_dir).await?;

        let path = self.input_path(job_id);
        fs::write(&path, &image_bytes).await?;

        Ok(path)
    }

    /// Fetch the full response body of `url`.
    ///
    /// Bounded by the decoder's timeout; non-2xx responses are failures.
    pub async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, InputError> {
        let response = self.http_client.get(url).send().await.map_err(|e| {
            tracing::error!(error = %e, url = %url, "Failed to fetch URL");
            InputError::Http(e)
        })?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), url = %url, "URL returned error status");
            return Err(InputError::FetchStatus(response.status()));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

/// Decode standard base64, ignoring embedded ASCII whitespace.
pub fn decode_base64(data: &str) -> Result<Vec<u8>, InputError> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(general_purpose::STANDARD.decode(compact)?)
}

/// Job ids become file names; reject anything that could leave the input directory.
fn validate_job_id(job_id: &str) -> Result<(), InputError> {
    if job_id.is_empty()
        || job_id.contains('/')
        || job_id.contains('\\')
        || job_id.contains("..")
        || job_id.contains('\0')
    {
        return Err(InputError::InvalidJobId(job_id.to_string()));
    }
    Ok(())
}

//! Image pipeline collaborator
//!
//! The entry point hands the decoded input and the opaque workflow to a
//! `Pipeline` and gets back the path of the produced file. The real image
//! generation backend lives outside this crate and implements this trait.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No input image available for job {0}")]
    MissingInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Failed(String),
}

/// Everything a pipeline needs for one job
#[derive(Debug, Clone, Copy)]
pub struct PipelineRequest<'a> {
    pub job_id: &'a str,
    /// Decoded input file, absent when the job carried no input
    pub input_path: Option<&'a Path>,
    /// Workflow payload, passed through unexamined
    pub workflow: &'a Value,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Run the workflow and return the path of the output file.
    async fn run(&self, request: PipelineRequest<'_>) -> Result<PathBuf, PipelineError>;
}

/// Copies the decoded input to `{output_dir}/{job_id}_output.png`.
///
/// Used for smoke tests of a deployment without an image backend.
#[derive(Debug, Clone)]
pub struct PassthroughPipeline {
    output_dir: PathBuf,
}

impl PassthroughPipeline {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_path(&self, job_id: &str) -> PathBuf {
        self.output_dir.join(format!("{}_output.png", job_id))
    }
}

#[async_trait]
impl Pipeline for PassthroughPipeline {
    async fn run(&self, request: PipelineRequest<'_>) -> Result<PathBuf, PipelineError> {
        let input_path = request
            .input_path
            .ok_or_else(|| PipelineError::MissingInput(request.job_id.to_string()))?;

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let output_path = self.output_path(request.job_id);
        let copied = tokio::fs::copy(input_path, &output_path).await?;

        tracing::debug!(
            job_id = %request.job_id,
            path = %output_path.display(),
            size_bytes = copied,
            "Passthrough pipeline copied input"
        );

        Ok(output_path)
    }
}

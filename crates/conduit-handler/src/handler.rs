//! Job orchestration entry point
//!
//! `handle` runs one job end to end: decode the input, hand it to the pipeline
//! and encode the result. It never fails and never panics towards its caller;
//! every outcome is a `JobResponse`.

use conduit_core::constants::{INPUT_FAILED_MESSAGE, NO_WORKFLOW_MESSAGE};
use conduit_core::{AdapterConfig, AppError, Job, JobResponse, LogLevel, OutputPayload};
use conduit_storage::create_store;
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::Instrument;

use crate::input::InputDecoder;
use crate::output::OutputEncoder;
use crate::pipeline::{Pipeline, PipelineRequest};

/// Run a raw job document.
///
/// A document that does not parse as a job gets the error envelope, with the
/// job id taken from a string `id` field when there is one.
pub async fn handle(job: Value, config: &AdapterConfig, pipeline: &dyn Pipeline) -> JobResponse {
    let job_id = Job::id_from_value(&job);

    match serde_json::from_value::<Job>(job) {
        Ok(job) => handle_job(job, config, pipeline).await,
        Err(e) => failure(&job_id, AppError::from(e)),
    }
}

/// Run a raw job document with configuration read from the environment.
///
/// Configuration is re-read on every call.
pub async fn handle_from_env(job: Value, pipeline: &dyn Pipeline) -> JobResponse {
    let config = AdapterConfig::from_env();
    handle(job, &config, pipeline).await
}

pub async fn handle_job(job: Job, config: &AdapterConfig, pipeline: &dyn Pipeline) -> JobResponse {
    let job_id = job.id().to_string();
    let span = tracing::info_span!("job", job_id = %job_id);
    let start = std::time::Instant::now();

    let result = AssertUnwindSafe(run(&job, config, pipeline).instrument(span))
        .catch_unwind()
        .await;

    match result {
        Ok(Ok(output)) => {
            tracing::info!(
                job_id = %job_id,
                output_type = output.kind(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Job completed"
            );
            JobResponse::success(job_id, output)
        }
        Ok(Err(err)) => failure(&job_id, err),
        Err(panic) => failure(&job_id, AppError::Internal(panic_message(&*panic))),
    }
}

async fn run(
    job: &Job,
    config: &AdapterConfig,
    pipeline: &dyn Pipeline,
) -> Result<OutputPayload, AppError> {
    let job_id = job.id();

    let store = create_store(&config.store).map_err(|e| AppError::Storage(e.to_string()))?;
    let encoder = OutputEncoder::new(store);

    let input_path = match job.input_spec() {
        Some(spec) => {
            let decoded = match InputDecoder::from_config(config) {
                Ok(decoder) => decoder.process(spec, job_id).await,
                Err(e) => Err(e),
            };
            match decoded {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::debug!(error = %e, "Rejecting job after input failure");
                    return Err(AppError::Rejected(INPUT_FAILED_MESSAGE.to_string()));
                }
            }
        }
        None => None,
    };

    let workflow = job
        .workflow()
        .ok_or_else(|| AppError::Rejected(NO_WORKFLOW_MESSAGE.to_string()))?;

    let output_path = pipeline
        .run(PipelineRequest {
            job_id,
            input_path: input_path.as_deref(),
            workflow,
        })
        .await
        .map_err(|e| AppError::Pipeline(e.to_string()))?;

    match encoder.process(&output_path, job_id).await {
        OutputPayload::Error(msg) => Err(AppError::Output(msg)),
        payload => Ok(payload),
    }
}

fn failure(job_id: &str, error: AppError) -> JobResponse {
    log_error(job_id, &error);
    JobResponse::error(job_id, error.client_message())
}

fn log_error(job_id: &str, error: &AppError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Warn => {
            tracing::warn!(job_id = %job_id, error = %error, code, "Job failed");
        }
        LogLevel::Error => {
            tracing::error!(job_id = %job_id, error = %error, code, "Job failed");
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("panic: {}", msg)
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("panic: {}", msg)
    } else {
        "panic: unknown cause".to_string()
    }
}

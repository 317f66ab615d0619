use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::OutputPayload;

/// Success envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSuccess {
    pub success: bool,
    pub job_id: String,
    pub output: OutputPayload,
    pub timestamp: DateTime<Utc>,
}

/// Error envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFailure {
    pub error: String,
    pub job_id: String,
}

/// Response to one job: exactly one of the two envelopes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobResponse {
    Success(JobSuccess),
    Error(JobFailure),
}

impl JobResponse {
    pub fn success(job_id: impl Into<String>, output: OutputPayload) -> Self {
        JobResponse::Success(JobSuccess {
            success: true,
            job_id: job_id.into(),
            output,
            timestamp: Utc::now(),
        })
    }

    pub fn error(job_id: impl Into<String>, error: impl Into<String>) -> Self {
        JobResponse::Error(JobFailure {
            error: error.into(),
            job_id: job_id.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobResponse::Success(_))
    }

    pub fn job_id(&self) -> &str {
        match self {
            JobResponse::Success(success) => &success.job_id,
            JobResponse::Error(failure) => &failure.job_id,
        }
    }

    pub fn output(&self) -> Option<&OutputPayload> {
        match self {
            JobResponse::Success(success) => Some(&success.output),
            JobResponse::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            JobResponse::Success(_) => None,
            JobResponse::Error(failure) => Some(&failure.error),
        }
    }
}

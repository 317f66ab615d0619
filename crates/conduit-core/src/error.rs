//! Error types module
//!
//! `AppError` is the failure that reaches the job entry point. Every variant ends
//! up in the top-level error envelope; `log_level` decides how loudly it is logged.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Warning level - for problems caused by the submitted job
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The job was understood but cannot be run; the message is client-facing
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid job: {0}")]
    InvalidJob(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable error code (e.g., "PIPELINE_ERROR")
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Rejected(_) => "JOB_REJECTED",
            AppError::InvalidJob(_) => "INVALID_JOB",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Pipeline(_) => "PIPELINE_ERROR",
            AppError::Output(_) => "OUTPUT_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Rejected(_) | AppError::InvalidJob(_) => LogLevel::Warn,
            AppError::Storage(_)
            | AppError::Pipeline(_)
            | AppError::Output(_)
            | AppError::Internal(_) => LogLevel::Error,
        }
    }

    /// Message placed in the response envelope.
    ///
    /// Output errors carry the encoder's message verbatim so the submitter sees
    /// e.g. "Output file not found" rather than a prefixed variant.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Output(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidJob(err.to_string())
    }
}

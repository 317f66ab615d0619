//! Input decoding errors
//!
//! None of these reach the job submitter directly: the entry point turns any of
//! them into the fixed "Failed to process input image" response.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("No input data provided")]
    MissingPayload,

    #[error("Input data must be a string, got: {0}")]
    InvalidPayload(String),

    #[error("Unknown input type: {0}")]
    UnknownKind(String),

    #[error("Invalid base64 data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Failed to fetch URL: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL returned status code: {0}")]
    FetchStatus(reqwest::StatusCode),

    #[error("Invalid job id for input file name: {0:?}")]
    InvalidJobId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Conduit Core Library
//!
//! This crate provides the configuration, error types, constants and wire models
//! shared by the storage client, the job handler and the CLI.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{AdapterConfig, StoreConfig};
pub use error::{AppError, LogLevel};
pub use models::{InputKind, InputSpec, Job, JobInput, JobResponse, OutputPayload};

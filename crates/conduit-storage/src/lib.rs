//! Conduit Storage Library
//!
//! This crate provides the remote object store client used to publish job outputs.
//! It includes the `BlobStore` trait and an S3-compatible implementation.
//!
//! # Storage key format
//!
//! Output keys are job-scoped: `{job_id}/{file_name}`. Keys must not be empty,
//! contain `..` or start with `/`. Key generation is centralized in the `keys` module.
//!
//! # Failure policy
//!
//! Uploads are best effort. `BlobStore::upload` never returns an error: a failed or
//! disabled upload is reported as `UploadOutcome::Skipped` and logged, and callers
//! fall back to inline encoding.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_store, DisabledStore};
pub use keys::output_key;
#[cfg(feature = "storage-s3")]
pub use s3::S3Store;
pub use traits::{BlobStore, StorageError, StorageResult, UploadOutcome};

//! Conduit Handler Library
//!
//! The job entry point and the two format adapters around the image pipeline:
//!
//! - [`InputDecoder`] turns an input specification (base64, URL, pre-signed
//!   store URL) into `{input_dir}/{job_id}_input.png`.
//! - [`Pipeline`] is the image generation collaborator; it receives the input
//!   path and the opaque workflow and returns the path of its output file.
//! - [`OutputEncoder`] publishes that file to the object store when enabled and
//!   falls back to inline base64 otherwise.
//! - [`handle`] wires them together and never fails: every outcome is a
//!   [`JobResponse`](conduit_core::JobResponse).

pub mod error;
pub mod handler;
pub mod input;
pub mod output;
pub mod pipeline;

pub use error::InputError;
pub use handler::{handle, handle_from_env, handle_job};
pub use input::InputDecoder;
pub use output::OutputEncoder;
pub use pipeline::{PassthroughPipeline, Pipeline, PipelineError, PipelineRequest};

//! Data models for the job wire format
//!
//! This module contains the job document consumed by the handler and the
//! response document it produces.

mod job;
mod output;
mod response;

// Re-export all models for convenient imports
pub use job::*;
pub use output::*;
pub use response::*;

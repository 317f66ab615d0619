//! Configuration module
//!
//! This module provides the configuration consumed by a single job invocation:
//! local directories, the input fetch timeout and the object store settings.
//! Configuration is read from the environment for every job and passed down
//! explicitly.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_BUCKET_NAME, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_REGION,
    FETCH_TIMEOUT_SECS,
};

/// Object store settings
///
/// The store is enabled iff endpoint, access key and secret key are all present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub endpoint_url: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub bucket_name: String,
    pub region: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            access_key_id: None,
            secret_access_key: None,
            bucket_name: DEFAULT_BUCKET_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl StoreConfig {
    /// Build the store settings from an arbitrary key lookup.
    ///
    /// Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        Self {
            endpoint_url: non_empty("BUCKET_ENDPOINT_URL"),
            access_key_id: non_empty("BUCKET_ACCESS_KEY_ID"),
            secret_access_key: non_empty("BUCKET_SECRET_ACCESS_KEY"),
            bucket_name: non_empty("BUCKET_NAME")
                .unwrap_or_else(|| DEFAULT_BUCKET_NAME.to_string()),
            region: non_empty("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.endpoint_url.is_some()
            && self.access_key_id.is_some()
            && self.secret_access_key.is_some()
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

/// Per-job adapter configuration
#[derive(Clone, Debug)]
pub struct AdapterConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub fetch_timeout: Duration,
    pub store: StoreConfig,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            fetch_timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            store: StoreConfig::default(),
        }
    }
}

impl AdapterConfig {
    /// Read the process environment.
    ///
    /// `.env` files are loaded once by the binary at startup, not here.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let fetch_timeout_secs = non_empty("INPUT_FETCH_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .unwrap_or(FETCH_TIMEOUT_SECS);

        Self {
            input_dir: non_empty("COMFYUI_INPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR)),
            output_dir: non_empty("COMFYUI_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            store: StoreConfig::from_lookup(&lookup),
        }
    }

    /// Replace the local directories, keeping everything else.
    pub fn with_dirs(
        mut self,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        self.input_dir = input_dir.into();
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }
}

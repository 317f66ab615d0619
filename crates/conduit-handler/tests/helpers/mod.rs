//! Test helpers: scratch directories, adapter configuration and fixtures.

use base64::{engine::general_purpose, Engine as _};
use conduit_core::{AdapterConfig, StoreConfig};
use tempfile::TempDir;

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

pub fn encode(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Scratch directories plus a configuration pointing at them
pub struct TestEnv {
    pub dir: TempDir,
    pub config: AdapterConfig,
}

impl TestEnv {
    /// Object store disabled
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = AdapterConfig::default()
            .with_dirs(dir.path().join("input"), dir.path().join("output"));
        Self { dir, config }
    }

    /// Object store enabled against `endpoint`
    pub fn with_store(endpoint: &str) -> Self {
        let env = Self::new();
        let store = StoreConfig {
            endpoint_url: Some(endpoint.to_string()),
            access_key_id: Some("test-key".to_string()),
            secret_access_key: Some("test-secret".to_string()),
            ..StoreConfig::default()
        };
        Self {
            config: env.config.with_store(store),
            dir: env.dir,
        }
    }

    pub fn input_file(&self, job_id: &str) -> std::path::PathBuf {
        self.config.input_dir.join(format!("{}_input.png", job_id))
    }
}

use serde::{Deserialize, Serialize};

/// How a produced image is represented in the response
///
/// Serialized as `{"type": "s3_url" | "base64" | "error", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum OutputPayload {
    /// Public URL of the uploaded object
    #[serde(rename = "s3_url")]
    StoreUrl(String),
    /// Standard base64 of the output file bytes
    Base64(String),
    /// Human-readable failure description
    Error(String),
}

impl OutputPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            OutputPayload::StoreUrl(_) => "s3_url",
            OutputPayload::Base64(_) => "base64",
            OutputPayload::Error(_) => "error",
        }
    }

    pub fn data(&self) -> &str {
        match self {
            OutputPayload::StoreUrl(data)
            | OutputPayload::Base64(data)
            | OutputPayload::Error(data) => data,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, OutputPayload::Error(_))
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::constants::UNKNOWN_JOB_ID;

/// How an input payload is interpreted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Payload is standard base64 of the image bytes
    #[serde(rename = "base64")]
    Base64,
    /// Payload is an HTTP(S) URL
    #[serde(rename = "url")]
    HttpUrl,
    /// Payload is a pre-signed object store URL
    #[serde(rename = "s3_url")]
    StoreUrl,
}

impl InputKind {
    /// URL kinds are fetched, base64 is decoded in place.
    pub fn is_remote(&self) -> bool {
        matches!(self, InputKind::HttpUrl | InputKind::StoreUrl)
    }
}

impl Display for InputKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            InputKind::Base64 => write!(f, "base64"),
            InputKind::HttpUrl => write!(f, "url"),
            InputKind::StoreUrl => write!(f, "s3_url"),
        }
    }
}

impl FromStr for InputKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base64" => Ok(InputKind::Base64),
            "url" => Ok(InputKind::HttpUrl),
            "s3_url" => Ok(InputKind::StoreUrl),
            _ => Err(anyhow::anyhow!("Invalid input type: {}", s)),
        }
    }
}

/// Input specification: `{"type": ..., "data": ...}`
///
/// Both fields are kept as raw JSON so that a malformed specification reaches
/// the decoder (and its log line) instead of failing the whole job document.
/// A present `null` is distinct from an absent field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InputSpec {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Wrap any present value, `null` included, in `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl InputSpec {
    pub fn new(kind: InputKind, data: impl Into<String>) -> Self {
        Self {
            kind: Some(Value::String(kind.to_string())),
            data: Some(Value::String(data.into())),
        }
    }

    /// Declared kind as written in the job, `base64` when omitted.
    pub fn kind_label(&self) -> String {
        match &self.kind {
            None => InputKind::Base64.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Parsed kind. Omitted means base64; a non-string value is never valid.
    pub fn kind(&self) -> Result<InputKind, anyhow::Error> {
        match &self.kind {
            None => Ok(InputKind::Base64),
            Some(Value::String(s)) => s.parse(),
            Some(other) => Err(anyhow::anyhow!("Invalid input type: {}", other)),
        }
    }

    /// Payload, unless absent or falsy (`null`, `""`, `0`, `false`, `[]`, `{}`).
    pub fn payload(&self) -> Option<&Value> {
        self.data.as_ref().filter(|data| !is_falsy(data))
    }
}

/// The `input` section of a job
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JobInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputSpec>,
    /// Pipeline workflow, passed through unexamined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<Value>,
}

/// One unit of work submitted to the handler
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Job {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<JobInput>,
}

impl Job {
    /// Job id, `"unknown"` when absent.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(UNKNOWN_JOB_ID)
    }

    pub fn input_spec(&self) -> Option<&InputSpec> {
        self.input.as_ref().and_then(|input| input.input.as_ref())
    }

    /// Workflow payload, `None` when absent or empty.
    pub fn workflow(&self) -> Option<&Value> {
        self.input
            .as_ref()
            .and_then(|input| input.workflow.as_ref())
            .filter(|workflow| !is_falsy(workflow))
    }

    /// Extract the job id from a raw document that may not parse as a `Job`.
    pub fn id_from_value(value: &Value) -> String {
        value
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_JOB_ID)
            .to_string()
    }
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` all count as "nothing provided".
pub fn is_falsy(workflow: &Value) -> bool {
    match workflow {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_kind_from_str() {
        assert_eq!("base64".parse::<InputKind>().unwrap(), InputKind::Base64);
        assert_eq!("url".parse::<InputKind>().unwrap(), InputKind::HttpUrl);
        assert_eq!("s3_url".parse::<InputKind>().unwrap(), InputKind::StoreUrl);
        assert!("bogus".parse::<InputKind>().is_err());
        assert!("URL".parse::<InputKind>().is_err());
    }

    #[test]
    fn test_input_kind_display_matches_wire_names() {
        for kind in [InputKind::Base64, InputKind::HttpUrl, InputKind::StoreUrl] {
            assert_eq!(kind.to_string().parse::<InputKind>().unwrap(), kind);
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                json!(kind.to_string())
            );
        }
    }

    #[test]
    fn test_input_kind_is_remote() {
        assert!(InputKind::HttpUrl.is_remote());
        assert!(InputKind::StoreUrl.is_remote());
        assert!(!InputKind::Base64.is_remote());
    }

    #[test]
    fn test_input_spec_defaults_to_base64() {
        let spec: InputSpec = serde_json::from_value(json!({ "data": "aGk=" })).unwrap();
        assert_eq!(spec.kind_label(), "base64");
        assert_eq!(spec.kind().unwrap(), InputKind::Base64);
        assert_eq!(spec.payload(), Some(&json!("aGk=")));
    }

    #[test]
    fn test_input_spec_keeps_unknown_kind() {
        let spec: InputSpec =
            serde_json::from_value(json!({ "type": "bogus", "data": "x" })).unwrap();
        assert_eq!(spec.kind_label(), "bogus");
        assert!(spec.kind().is_err());
    }

    #[test]
    fn test_input_spec_accepts_non_string_fields() {
        let spec: InputSpec = serde_json::from_value(json!({ "type": 5, "data": 1234 })).unwrap();
        assert_eq!(spec.kind_label(), "5");
        assert!(spec.kind().is_err());
        assert_eq!(spec.payload(), Some(&json!(1234)));
    }

    #[test]
    fn test_null_type_is_not_omitted() {
        let spec: InputSpec =
            serde_json::from_value(json!({ "type": null, "data": "aGk=" })).unwrap();
        assert_eq!(spec.kind, Some(Value::Null));
        assert_eq!(spec.kind_label(), "null");
        assert!(spec.kind().is_err());
    }

    #[test]
    fn test_empty_payload_is_none() {
        let spec = InputSpec::new(InputKind::HttpUrl, "");
        assert_eq!(spec.payload(), None);
        assert_eq!(InputSpec::default().payload(), None);
        let spec: InputSpec = serde_json::from_value(json!({ "data": null })).unwrap();
        assert_eq!(spec.payload(), None);
    }

    #[test]
    fn test_job_parsing() {
        let job: Job = serde_json::from_value(json!({
            "id": "j1",
            "input": {
                "input": { "type": "url", "data": "https://example.com/a.png" },
                "workflow": { "nodes": [] }
            }
        }))
        .unwrap();

        assert_eq!(job.id(), "j1");
        assert_eq!(job.input_spec().unwrap().kind().unwrap(), InputKind::HttpUrl);
        assert_eq!(job.workflow(), Some(&json!({ "nodes": [] })));
    }

    #[test]
    fn test_job_without_id_is_unknown() {
        let job: Job = serde_json::from_value(json!({ "input": {} })).unwrap();
        assert_eq!(job.id(), "unknown");
        assert!(job.input_spec().is_none());
        assert!(job.workflow().is_none());
        assert_eq!(Job::id_from_value(&json!({ "id": 42 })), "unknown");
        assert_eq!(Job::id_from_value(&json!({ "id": "abc" })), "abc");
    }

    #[test]
    fn test_empty_workflows() {
        for empty in [json!(null), json!(false), json!(0), json!(""), json!([]), json!({})] {
            assert!(is_falsy(&empty), "{empty} should be empty");
        }
        for present in [json!(true), json!(1), json!("x"), json!([1]), json!({ "a": 1 })] {
            assert!(!is_falsy(&present), "{present} should not be empty");
        }
    }
}

//! Fixed values shared across crates.

/// Job id used when the job document carries none.
pub const UNKNOWN_JOB_ID: &str = "unknown";

/// Default local directory the decoded input image is written to.
pub const DEFAULT_INPUT_DIR: &str = "/comfyui/input";

/// Default local directory pipelines write their results to.
pub const DEFAULT_OUTPUT_DIR: &str = "/comfyui/output";

/// Default bucket for uploaded outputs.
pub const DEFAULT_BUCKET_NAME: &str = "comfy-outputs";

/// Default region for the object store client.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Timeout applied to URL fetches of input images.
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Content type set on every uploaded output.
pub const OUTPUT_CONTENT_TYPE: &str = "image/png";

/// Suffix of the file the decoded input is written to: `{job_id}_input.png`.
pub const INPUT_FILE_SUFFIX: &str = "_input.png";

/// Top-level error messages returned to the job submitter.
pub const INPUT_FAILED_MESSAGE: &str = "Failed to process input image";
pub const NO_WORKFLOW_MESSAGE: &str = "No workflow provided";
pub const OUTPUT_NOT_FOUND_MESSAGE: &str = "Output file not found";

//! Shared constants and invariants

/// Workflow every session is created for.
pub const WORKFLOW_ID: &str = "wf_690f89e6ad3481908e6b3aaf13d73648023a37965a01916e";
/// Metadata tag attached to every session.
pub const METADATA_SOURCE_KEY: &str = "source";
pub const METADATA_SOURCE_VALUE: &str = "bizscanfix_web_portal";

pub const SESSION_ROUTE: &str = "/api/chatkit/session";

// Vendor
pub const DEFAULT_VENDOR_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 30_000;
pub const CHATKIT_SESSIONS_PATH: &str = "/chatkit/sessions";
pub const CHATKIT_BETA_HEADER: &str = "OpenAI-Beta";
pub const CHATKIT_BETA_VALUE: &str = "chatkit_beta=v1";

// Server
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "8000";
pub const DEFAULT_METRICS_PATH: &str = "/metrics";
pub const DEFAULT_LOG_LEVEL: &str = "info";

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::config::settings::SettingsConfig;
use crate::utils::constants::{
    DEFAULT_API_KEY_ENV, DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_VENDOR_BASE_URL, METADATA_SOURCE_KEY,
    METADATA_SOURCE_VALUE, WORKFLOW_ID,
};

/// Top-level service config. Every section is optional in yaml.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServiceConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub vendor: VendorConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// ================================
/// Vendor (ChatKit API) access
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct VendorConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// name of the env var holding the api key, never the key itself
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// ================================
/// Session parameters sent on every create call
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_workflow_id")]
    pub workflow_id: String,
    #[serde(default = "default_metadata")]
    pub metadata: BTreeMap<String, String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            workflow_id: default_workflow_id(),
            metadata: default_metadata(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_VENDOR_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

fn default_workflow_id() -> String {
    WORKFLOW_ID.to_string()
}

fn default_metadata() -> BTreeMap<String, String> {
    BTreeMap::from([(
        METADATA_SOURCE_KEY.to_string(),
        METADATA_SOURCE_VALUE.to_string(),
    )])
}

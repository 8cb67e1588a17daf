use std::collections::BTreeMap;

use crate::config::service::SessionConfig;
use crate::vendor::{CreateSessionRequest, WorkflowRef};

pub mod error;
pub mod handler;

/// Workflow and metadata sent with every session create call.
/// Built once at startup; callers have no way to influence it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParams {
    pub workflow_id: String,
    pub metadata: BTreeMap<String, String>,
}

impl SessionParams {
    pub fn from_config(cfg: &SessionConfig) -> Self {
        Self {
            workflow_id: cfg.workflow_id.trim().to_owned(),
            metadata: cfg.metadata.clone(),
        }
    }

    pub fn to_request(&self) -> CreateSessionRequest {
        CreateSessionRequest {
            workflow: WorkflowRef { id: self.workflow_id.clone() },
            metadata: self.metadata.clone(),
        }
    }
}

impl Default for SessionParams {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

use std::path::Path;
use anyhow::{anyhow, Result};

use crate::config::proc_loader::{file_to_config, parse_config};
use crate::config::service::ServiceConfig;

/// Load the service config. Without a path every setting takes its default.
pub async fn run(config_path: Option<&str>) -> Result<ServiceConfig> {
    match config_path {
        Some(config_path) => file_to_config(Path::new(config_path))
            .await
            .map_err(|e| anyhow!("Invalid config {}: {}", config_path, e)),
        None => parse_config(String::new()).await,
    }
}

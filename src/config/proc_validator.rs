//! Configuration validation with aggregated errors.
//! Every issue found is collected so the operator sees all of them at once.

use tracing::{error, info};

use crate::config::service::{ServiceConfig, SessionConfig, VendorConfig};
use crate::config::settings::{LoggingConfig, SettingsConfig};
use crate::observability::metrics::get_metrics;
use crate::utils::constants::SESSION_ROUTE;

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub async fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_vendor(&cfg.vendor, &mut errors);
    validate_session(&cfg.session, &mut errors);

    if errors.is_empty() {
        info!("config validation passed");
        Ok(())
    } else {
        let metrics = get_metrics().await;
        for e in &errors {
            error!("config validation error: {}", e);
            metrics.config_validation_errors.inc();
        }
        Err(errors)
    }
}

fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    let server = &settings.server;
    if server.host.trim().is_empty() {
        errors.push("settings.server.host must not be empty".to_string());
    }
    match server.port.trim().parse::<u16>() {
        Ok(0) => errors.push("settings.server.port must be greater than 0".to_string()),
        Ok(_) => {}
        Err(_) => errors.push(format!(
            "settings.server.port '{}' is not a valid port number",
            server.port
        )),
    }

    let metrics = &settings.metrics;
    if metrics.is_enabled {
        if !metrics.path.starts_with('/') {
            errors.push(format!(
                "settings.metrics.path '{}' must start with '/'",
                metrics.path
            ));
        }
        if metrics.path == SESSION_ROUTE {
            errors.push(format!(
                "settings.metrics.path '{}' collides with the session route",
                metrics.path
            ));
        }
    }

    if let Some(logging) = &settings.logging {
        validate_logging(logging, errors);
    }
}

fn validate_logging(logging: &LoggingConfig, errors: &mut Vec<String>) {
    if logging.level.trim().is_empty() {
        errors.push("settings.logging.level must not be empty".to_string());
    }
}

fn validate_vendor(vendor: &VendorConfig, errors: &mut Vec<String>) {
    let base_url = vendor.base_url.trim();
    if base_url.is_empty() {
        errors.push("vendor.base_url must not be empty".to_string());
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(format!(
            "vendor.base_url '{}' must start with http:// or https://",
            base_url
        ));
    } else if reqwest::Url::parse(base_url).is_err() {
        errors.push(format!("vendor.base_url '{}' is not a valid URL", base_url));
    }

    if vendor.timeout_ms == 0 {
        errors.push("vendor.timeout_ms must be greater than 0".to_string());
    }
    if vendor.api_key_env.trim().is_empty() {
        errors.push("vendor.api_key_env must name an environment variable".to_string());
    }
}

fn validate_session(session: &SessionConfig, errors: &mut Vec<String>) {
    if session.workflow_id.trim().is_empty() {
        errors.push("session.workflow_id must not be empty".to_string());
    }
    for key in session.metadata.keys() {
        if key.trim().is_empty() {
            errors.push("session.metadata keys must not be empty".to_string());
        }
    }
}

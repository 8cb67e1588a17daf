use std::sync::Arc;
use anyhow::{anyhow, Result};
use axum::extract::FromRef;
use axum::routing::post;
use axum::Router;
use tracing::info;

use crate::config::credentials::ApiCredential;
use crate::config::service::ServiceConfig;
use crate::config::settings::{MetricsConfig, SettingsConfig};
use crate::observability::metrics::{get_metrics, Metrics};
use crate::observability::routes::MetricsState;
use crate::session::handler::create_chatkit_session;
use crate::session::SessionParams;
use crate::utils::constants::SESSION_ROUTE;
use crate::vendor::openai::OpenAiChatKitClient;
use crate::vendor::SessionIssuer;

/// Process-wide state, built once at startup and cloned into every request.
#[derive(Clone)]
pub struct AppState<S> {
    pub issuer: S,
    pub params: Arc<SessionParams>,
    pub metrics_state: MetricsState,
}

impl<S: SessionIssuer> AppState<S> {
    pub fn new(issuer: S, params: SessionParams, metrics: &Metrics) -> Self {
        Self {
            issuer,
            params: Arc::new(params),
            metrics_state: MetricsState::new(metrics.registry.clone()),
        }
    }
}

impl<S> FromRef<AppState<S>> for MetricsState {
    fn from_ref(state: &AppState<S>) -> Self {
        state.metrics_state.clone()
    }
}

/// Build the production state: reads the vendor credential and constructs
/// the ChatKit client. Fails when the credential is missing.
pub async fn build_state(cfg: &ServiceConfig) -> Result<AppState<OpenAiChatKitClient>> {
    let credential = ApiCredential::from_env(&cfg.vendor.api_key_env)?;
    let issuer = OpenAiChatKitClient::new(&cfg.vendor, credential)?;
    info!("ChatKit sessions endpoint: {}", issuer.sessions_url());

    let params = SessionParams::from_config(&cfg.session);
    info!("workflow: {}", params.workflow_id);

    Ok(AppState::new(issuer, params, get_metrics().await))
}

pub fn router<S: SessionIssuer>(state: AppState<S>, metrics_config: &MetricsConfig) -> Router {
    Router::new()
        .route(SESSION_ROUTE, post(create_chatkit_session::<S>))
        .merge(state.metrics_state.router(metrics_config))
        .with_state(state)
}

/// Bind and serve until Ctrl-C / SIGTERM.
pub async fn start<S: SessionIssuer>(settings_config: &SettingsConfig, state: AppState<S>) -> Result<()> {
    let metrics = get_metrics().await;
    let app = router(state, &settings_config.metrics);

    let bind_addr = settings_config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow!("cannot bind {}: {}", bind_addr, e))?;
    info!("listening on {}", bind_addr);
    info!("served path: {}", SESSION_ROUTE);
    if settings_config.metrics.is_enabled {
        info!("served path: {}", settings_config.metrics.path);
    }

    metrics.up.set(1);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    metrics.up.set(0);
    info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use serial_test::serial;

    use crate::tests::common::{build_reqwest_client, spawn_axum, StubIssuer};

    const KEY_VAR: &str = "CHATKIT_SERVER_TEST_API_KEY";

    fn config() -> ServiceConfig {
        let mut cfg = ServiceConfig::default();
        cfg.vendor.api_key_env = KEY_VAR.to_string();
        cfg
    }

    #[tokio::test]
    #[serial]
    async fn startup_fails_without_credential() {
        std::env::remove_var(KEY_VAR);
        let err = build_state(&config()).await.err().expect("startup must fail");
        assert!(err.to_string().contains(KEY_VAR));
    }

    #[tokio::test]
    #[serial]
    async fn startup_succeeds_with_credential() -> Result<()> {
        std::env::set_var(KEY_VAR, "sk-test");
        let state = build_state(&config()).await?;
        assert_eq!(state.issuer.sessions_url(), "https://api.openai.com/v1/chatkit/sessions");
        assert_eq!(*state.params, SessionParams::default());
        std::env::remove_var(KEY_VAR);
        Ok(())
    }

    #[tokio::test]
    async fn metrics_route_is_served_when_enabled() -> Result<()> {
        let metrics_config = MetricsConfig { path: "/metrics".to_string(), is_enabled: true };
        let state = AppState::new(StubIssuer::with_secrets(&["ek_1"]), SessionParams::default(), get_metrics().await);
        let (handle, addr) = spawn_axum(router(state, &metrics_config)).await;
        let client = build_reqwest_client();

        client.post(format!("http://{}{}", addr, SESSION_ROUTE)).send().await?;
        let response = client.get(format!("http://{}/metrics", addr)).send().await?;
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.text().await?;
        assert!(body.contains("chatkit_session_requests_total"));

        handle.abort();
        Ok(())
    }

    #[tokio::test]
    async fn metrics_route_is_absent_when_disabled() -> Result<()> {
        let state = AppState::new(StubIssuer::with_secrets(&["ek_1"]), SessionParams::default(), get_metrics().await);
        let (handle, addr) = spawn_axum(router(state, &MetricsConfig::default())).await;

        let response = build_reqwest_client()
            .get(format!("http://{}/metrics", addr))
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        handle.abort();
        Ok(())
    }
}

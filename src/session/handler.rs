use axum::{extract::State, Json};
use chrono::{TimeZone, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{error, info};

use crate::observability::metrics::{get_metrics, OUTCOME_FAILURE, OUTCOME_SUCCESS};
use crate::server::server::AppState;
use crate::session::error::SessionError;
use crate::vendor::SessionIssuer;

#[derive(Serialize)]
pub struct SessionResponse {
    pub client_secret: String,
}

impl fmt::Debug for SessionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionResponse")
            .field("client_secret", &"***")
            .finish()
    }
}

/// `POST /api/chatkit/session`
///
/// Creates a vendor session for the configured workflow and relays its
/// client secret. The request body is never read.
pub async fn create_chatkit_session<S: SessionIssuer>(
    State(state): State<AppState<S>>,
) -> Result<Json<SessionResponse>, SessionError> {
    let metrics = get_metrics().await;
    let request = state.params.to_request();

    match state.issuer.create_session(&request).await {
        Ok(session) => {
            let expires_at = session
                .expires_at
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
                .map(|date_time| date_time.to_rfc3339());
            info!(
                session_id = session.id.as_deref().unwrap_or("-"),
                expires_at = expires_at.as_deref().unwrap_or("-"),
                "ChatKit session created"
            );
            metrics.session_requests.with_label_values(&[OUTCOME_SUCCESS]).inc();
            Ok(Json(SessionResponse {
                client_secret: session.client_secret,
            }))
        }
        Err(e) => {
            error!("ChatKit session creation failed: {:#}", e);
            metrics.session_requests.with_label_values(&[OUTCOME_FAILURE]).inc();
            Err(SessionError::from(e))
        }
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Failure while creating a session. The vendor's error is kept for logs
/// but never shown to the caller.
#[derive(Debug)]
pub enum SessionError {
    Vendor(anyhow::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Vendor(e) => write!(f, "Vendor error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: &'static str,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: "internal_error",
            message: "Internal Server Error",
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<anyhow::Error> for SessionError {
    fn from(err: anyhow::Error) -> Self {
        SessionError::Vendor(err)
    }
}

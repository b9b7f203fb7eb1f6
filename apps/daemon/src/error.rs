use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use notifier_model::ModelError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("[DAEMON_VALIDATION]: {0}")]
    Validation(#[from] ModelError),

    #[error("[DAEMON_NOT_FOUND]: notification {0} not found in center")]
    NotFound(i64),

    #[error("[DAEMON_CONFIG]: {0}")]
    Config(String),

    #[error("[DAEMON_BAD_REQUEST]: {0}")]
    BadRequest(String),
}

impl IntoResponse for DaemonError {
    fn into_response(self) -> Response {
        let status = match &self {
            DaemonError::Validation(_) => StatusCode::BAD_REQUEST,
            DaemonError::NotFound(_) => StatusCode::NOT_FOUND,
            DaemonError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DaemonError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        let body = Json(json!({ "error": status.as_str(), "detail": self.to_string() }));
        (status, body).into_response()
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use notifier_model::ModelError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("[BROKER_AUTH]: missing or invalid bearer token")]
    Unauthorized,

    #[error("[BROKER_VALIDATION]: {0}")]
    Validation(#[from] ModelError),

    #[error("[BROKER_CODEC]: {0}")]
    Codec(#[from] notifier_codec::CodecError),

    #[error("[BROKER_NOT_FOUND]: {0}")]
    NotFound(String),
}

impl IntoResponse for BrokerError {
    fn into_response(self) -> Response {
        let status = match &self {
            BrokerError::Unauthorized => StatusCode::UNAUTHORIZED,
            BrokerError::Validation(_) => StatusCode::BAD_REQUEST,
            BrokerError::Codec(_) => StatusCode::BAD_REQUEST,
            BrokerError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        let body = Json(json!({ "error": status.as_str(), "detail": self.to_string() }));
        (status, body).into_response()
    }
}

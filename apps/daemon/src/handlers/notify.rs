use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use notifier_model::Notification;
use tracing::instrument;

use crate::error::DaemonError;
use crate::services::ingress::IngressPipeline;
use crate::state::AppState;

/// `POST /notify` — local submission, bypassing any broker.
#[instrument(skip(state, notification))]
pub async fn submit_notification(
    State(state): State<AppState>,
    Json(notification): Json<Notification>,
) -> Result<StatusCode, DaemonError> {
    notification.validate()?;
    IngressPipeline::new(&state).handle_inbound("local", notification).await;
    Ok(StatusCode::ACCEPTED)
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use notifier_codec::{encode, Frame};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::BrokerError;
use crate::services::icon;
use crate::state::AppState;

/// `POST /notify` — admits a notification and fans it out to every
/// connected daemon.
#[instrument(skip(state, notification))]
pub async fn submit_notification(
    State(state): State<AppState>,
    Json(mut notification): Json<notifier_model::Notification>,
) -> Result<(StatusCode, Json<serde_json::Value>), BrokerError> {
    notification.validate()?;

    let id = Uuid::new_v4().to_string();

    icon::normalize_icon_href(&state.http_client, &mut notification).await;

    if notification.exclusive {
        notification.id = Some(id.clone());
        state.pending.insert(id.clone(), notification.clone());
    }

    let frame = Frame::Notification(notification);
    let payload = encode(&frame)?;
    state.registry.broadcast(payload);

    info!(id, "notification admitted and broadcast");
    Ok((StatusCode::ACCEPTED, Json(json!({ "id": id }))))
}

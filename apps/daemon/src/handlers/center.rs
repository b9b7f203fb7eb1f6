use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::DaemonError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClearQuery {
    #[serde(default)]
    confirm: bool,
}

/// `GET /center` — lists stored notifications, and records that the center
/// was just polled (used as the "center is open" signal, see the design
/// ledger's note on the 5-second polling window).
pub async fn list_center(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.center_open.record_poll();
    let entries = state.center_store.list().await;
    Json(json!({ "notifications": entries }))
}

/// `DELETE /center/{id}` — removes one stored notification.
pub async fn delete_one(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, DaemonError> {
    if state.center_store.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(DaemonError::NotFound(id))
    }
}

/// `DELETE /center?confirm=true` — clears the whole center; requires the
/// explicit confirm flag to avoid an accidental wipe from a bare DELETE.
pub async fn clear_all(
    State(state): State<AppState>,
    Query(query): Query<ClearQuery>,
) -> Result<StatusCode, DaemonError> {
    if !query.confirm {
        return Err(DaemonError::BadRequest("clearing the center requires confirm=true".into()));
    }
    state.center_store.clear().await;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /center/count`
pub async fn count(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "count": state.center_store.count().await }))
}

/// `POST /center/close` — an explicit close signal from a UI layer, when
/// one exists; resets the inferred "center is open" state immediately
/// rather than waiting for the poll window to lapse.
pub async fn close(State(state): State<AppState>) -> StatusCode {
    state.center_open.clear();
    StatusCode::NO_CONTENT
}

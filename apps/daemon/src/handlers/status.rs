use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// `GET /status` — a liveness/debug snapshot of the daemon core.
pub async fn get_status(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "visible_popups": state.popups.len(),
        "center_open": state.center_open.is_open(),
    }))
}

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "connected_daemons": state.registry.connected_count().await,
    }))
}

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{center, notify, status};
use crate::state::AppState;

/// Builds the daemon's loopback HTTP surface. Unlike the broker, this is
/// never exposed beyond `127.0.0.1`, so it carries no auth middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/notify", post(notify::submit_notification))
        .route("/status", get(status::get_status))
        .route("/center", get(center::list_center).delete(center::clear_all))
        .route("/center/:id", delete(center::delete_one))
        .route("/center/count", get(center::count))
        .route("/center/close", post(center::close))
        .with_state(state)
}

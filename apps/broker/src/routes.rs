use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{health, notify, ws};
use crate::middleware::auth_guard;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let authenticated = Router::new()
        .route("/notify", post(notify::submit_notification))
        .route("/ws", get(ws::establish_uplink))
        .layer(axum::middleware::from_fn_with_state(state.clone(), auth_guard));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(authenticated)
        .layer(cors)
        .with_state(state)
}

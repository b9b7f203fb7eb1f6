pub mod pending;
pub mod registry;

use std::sync::Arc;

use pending::PendingRegistry;
use registry::ConnectionRegistry;

/// Shared application state handed to every handler via `axum::extract::State`.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ConnectionRegistry>,
    pub pending: Arc<PendingRegistry>,
    pub secret: Arc<String>,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(secret: String) -> Self {
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
            pending: Arc::new(PendingRegistry::new()),
            secret: Arc::new(secret),
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("failed to build HTTP client"),
        }
    }
}

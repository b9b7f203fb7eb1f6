use tracing::info;

use crate::config::BrokerConfig;
use crate::routes::build_router;
use crate::state::AppState;

pub struct BrokerKernel {
    port: u16,
    state: AppState,
}

impl BrokerKernel {
    pub fn ignite(config: BrokerConfig) -> Self {
        Self {
            port: config.port,
            state: AppState::new(config.secret),
        }
    }

    pub async fn serve(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        let address = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&address).await?;
        info!(address, "broker listening");
        axum::serve(listener, router).await
    }
}

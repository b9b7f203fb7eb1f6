use std::collections::HashMap;
use std::path::PathBuf;

use notifier_center_store::CenterStore;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::cli::DaemonCli;
use crate::client::BrokerConnection;
use crate::config::{ConfigSupervisor, ServerDiff};
use crate::routes::build_router;
use crate::services::expiration::run_expiration_sweep;
use crate::state::AppState;

const DEFAULT_CONFIG_PATH: &str = "cross-notifier/config.json";
const DEFAULT_CENTER_PATH: &str = "cross-notifier/notifications.json";

pub struct DaemonKernel {
    port: u16,
    cli_servers: Vec<notifier_model::ServerEntry>,
    config_path: PathBuf,
    state: AppState,
}

impl DaemonKernel {
    pub async fn ignite(cli: DaemonCli) -> Self {
        let center_store = CenterStore::open(DEFAULT_CENTER_PATH)
            .await
            .unwrap_or_else(|e| panic!("failed to open center store: {e}"));

        let state = AppState::new(center_store, notifier_model::RulesConfig::default());

        let cli_servers = build_cli_servers(&cli);

        Self {
            port: cli.port,
            cli_servers,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            state,
        }
    }

    pub async fn launch(self) -> std::io::Result<()> {
        let (diff_tx, diff_rx) = mpsc::channel(16);
        let supervisor = ConfigSupervisor::new(self.config_path.clone(), self.state.clone(), diff_tx);

        let mut servers = supervisor.load_initial().await;
        servers.extend(self.cli_servers.clone());

        let mut connections: HashMap<String, JoinHandle<()>> = HashMap::new();
        for server in &servers {
            connections.insert(server.name.clone(), BrokerConnection::spawn(server.clone(), self.state.clone()));
        }

        tokio::spawn(supervisor.run(servers));
        tokio::spawn(manage_connections(diff_rx, self.state.clone(), connections));
        tokio::spawn(run_expiration_sweep(self.state.clone()));

        let router = build_router(self.state);
        let address = format!("127.0.0.1:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&address).await?;
        info!(address, "daemon HTTP surface listening");
        axum::serve(listener, router).await
    }
}

async fn manage_connections(
    mut diffs: mpsc::Receiver<ServerDiff>,
    state: AppState,
    mut connections: HashMap<String, JoinHandle<()>>,
) {
    while let Some(diff) = diffs.recv().await {
        match diff {
            ServerDiff::Added(server) | ServerDiff::Changed(server) => {
                if let Some(existing) = connections.remove(&server.name) {
                    existing.abort();
                }
                connections.insert(server.name.clone(), BrokerConnection::spawn(server, state.clone()));
            }
            ServerDiff::Removed(name) => {
                if let Some(handle) = connections.remove(&name) {
                    handle.abort();
                }
                state.uplinks.unregister(&name);
            }
        }
    }
}

fn build_cli_servers(cli: &DaemonCli) -> Vec<notifier_model::ServerEntry> {
    let name = cli.name.clone().unwrap_or_else(|| "default".to_string());
    let secret = cli.secret.clone().unwrap_or_default();
    cli.connect
        .iter()
        .map(|url| notifier_model::ServerEntry {
            url: url.clone(),
            secret: secret.clone(),
            name: name.clone(),
        })
        .collect()
}

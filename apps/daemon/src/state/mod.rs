pub mod action_state;
pub mod center_open;
pub mod popup_set;
pub mod server_map;
pub mod uplinks;

use std::sync::Arc;

use notifier_center_store::CenterStore;
use notifier_model::RulesConfig;
use tokio::sync::RwLock;

use action_state::ActionStateMap;
use center_open::CenterOpenTracker;
use popup_set::PopupSet;
use server_map::ServerIdMap;
use uplinks::UplinkRegistry;

/// Shared application state handed to every handler and background task.
#[derive(Clone)]
pub struct AppState {
    pub popups: Arc<PopupSet>,
    pub action_states: Arc<ActionStateMap>,
    pub center_open: Arc<CenterOpenTracker>,
    pub server_ids: Arc<ServerIdMap>,
    pub uplinks: Arc<UplinkRegistry>,
    pub center_store: Arc<CenterStore>,
    pub rules: Arc<RwLock<RulesConfig>>,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(center_store: CenterStore, rules: RulesConfig) -> Self {
        Self {
            popups: Arc::new(PopupSet::new()),
            action_states: Arc::new(ActionStateMap::new()),
            center_open: Arc::new(CenterOpenTracker::new()),
            server_ids: Arc::new(ServerIdMap::new()),
            uplinks: Arc::new(UplinkRegistry::new()),
            center_store: Arc::new(center_store),
            rules: Arc::new(RwLock::new(rules)),
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("failed to build HTTP client"),
        }
    }
}

use std::time::Instant;

use tokio::time::{interval, Duration};
use tracing::instrument;

use crate::state::AppState;

const SWEEP_INTERVAL: Duration = Duration::from_millis(250);

/// Background loop that evicts expired popups and, for any that were shown
/// (as opposed to silently stored), files them into the center store
/// exactly once.
pub async fn run_expiration_sweep(state: AppState) {
    let mut ticker = interval(SWEEP_INTERVAL);
    loop {
        ticker.tick().await;
        sweep_once(&state, Instant::now()).await;
    }
}

#[instrument(skip(state))]
async fn sweep_once(state: &AppState, now: Instant) {
    for popup in state.popups.sweep_expired(now) {
        state.server_ids.remove_by_local_id(popup.local_id);
        state.action_states.clear_all_for_popup(popup.local_id);
        state.center_store.append(popup.notification).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notifier_center_store::CenterStore;
    use notifier_model::{Notification, RulesConfig};
    use std::time::Duration as StdDuration;

    fn sample() -> Notification {
        Notification {
            id: None,
            source: "s".into(),
            title: "t".into(),
            message: "m".into(),
            icon_data: None,
            icon_href: None,
            icon_path: None,
            duration: 0,
            actions: vec![],
            exclusive: false,
        }
    }

    #[tokio::test]
    async fn expired_popup_produces_exactly_one_center_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = CenterStore::open(dir.path().join("notifications.json")).await.unwrap();
        let state = AppState::new(store, RulesConfig::default());

        let local_id = state.popups.allocate_local_id();
        state.popups.show(local_id, sample(), "broker-a".into());

        sweep_once(&state, Instant::now() + StdDuration::from_millis(1)).await;

        assert_eq!(state.center_store.count().await, 1);
    }
}

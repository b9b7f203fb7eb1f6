use notifier_model::{classify, Classification, Notification};
use tracing::{instrument, warn};

use crate::state::AppState;

/// The daemon's ingress pipeline: normalizes an incoming notification,
/// classifies it against the active rules, and routes it to a popup, the
/// center store, or nowhere at all.
pub struct IngressPipeline<'a> {
    state: &'a AppState,
}

impl<'a> IngressPipeline<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[instrument(skip(self, notification), fields(source = %notification.source))]
    pub async fn handle_inbound(&self, server_name: &str, notification: Notification) {
        if let Err(e) = notification.validate() {
            warn!(error = %e, "rejecting invalid notification at ingress");
            return;
        }

        let rules = self.state.rules.read().await.clone();
        let center_open = self.state.center_open.is_open();

        let classification = match classify(
            &rules,
            server_name,
            &notification.source,
            "",
            &notification.title,
            &notification.message,
            center_open,
        ) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "rule evaluation failed, treating as normal");
                Classification::NormalOtherwise
            }
        };

        match classification {
            Classification::Dismiss => {}
            Classification::SilentStore | Classification::NormalWithCenterOpen => {
                self.state.center_store.append(notification).await;
            }
            Classification::NormalOtherwise => {
                let local_id = self.state.popups.allocate_local_id();
                if let Some(server_id) = notification.id.clone() {
                    self.state.server_ids.insert(server_id, local_id);
                }
                self.state.popups.show(local_id, notification, server_name.to_string());
            }
        }
    }

    /// Handles a `resolved` frame: if this daemon still shows the popup for
    /// the resolved notification, dismiss it and, for an action whose
    /// `open` flag is set, open its URL locally.
    #[instrument(skip(self, resolved))]
    pub async fn dispatch_resolved(&self, resolved: notifier_codec::ResolvedFrame) {
        let Some(local_id) = self.state.server_ids.local_id_for(&resolved.id) else {
            return;
        };

        if self.state.popups.remove(local_id).is_none() {
            return;
        }
        self.state.server_ids.remove_by_local_id(local_id);
        self.state.action_states.clear_all_for_popup(local_id);

        if resolved.success {
            if let Some(action) = resolved.action {
                if action.open {
                    crate::services::action_executor::open_url_detached(&action.url);
                }
            }
        }
    }
}

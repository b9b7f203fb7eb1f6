use std::collections::HashMap;
use std::sync::Mutex;

use notifier_model::{Action, Notification};
use tracing::instrument;

pub struct PendingEntry {
    pub notification: Notification,
}

/// Outcome of resolving an action click against a pending exclusive
/// notification.
pub enum ResolveOutcome {
    /// This caller won the race; here is the action it resolved.
    Resolved(Action),
    /// The action index named does not exist on this notification.
    InvalidIndex,
    /// Someone else already resolved it, or it was never exclusive.
    AlreadyResolved,
}

/// Tracks exclusive notifications awaiting exactly one action resolution.
///
/// The registry is a plain mutex-guarded map: the first caller to remove an
/// entry wins the race, which is the entire coordination protocol. No
/// caller ever reaches into the map directly.
pub struct PendingRegistry {
    entries: Mutex<HashMap<String, PendingEntry>>,
}

impl PendingRegistry {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[instrument(skip(self, notification))]
    pub fn insert(&self, id: String, notification: Notification) {
        self.entries.lock().expect("pending registry lock poisoned").insert(id, PendingEntry { notification });
    }

    /// Atomically removes and resolves the pending entry for `id`, if any.
    #[instrument(skip(self))]
    pub fn resolve(&self, id: &str, action_index: usize) -> ResolveOutcome {
        let mut guard = self.entries.lock().expect("pending registry lock poisoned");
        let Some(entry) = guard.remove(id) else {
            return ResolveOutcome::AlreadyResolved;
        };
        match entry.notification.actions.get(action_index) {
            Some(action) => ResolveOutcome::Resolved(action.clone()),
            None => ResolveOutcome::InvalidIndex,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("pending registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PendingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notifier_model::Action;

    fn notification_with_actions() -> Notification {
        Notification {
            id: Some("n1".into()),
            source: "src".into(),
            title: "t".into(),
            message: "m".into(),
            icon_data: None,
            icon_href: None,
            icon_path: None,
            duration: 5000,
            actions: vec![Action {
                label: "Open".into(),
                url: "https://example.com".into(),
                method: "GET".into(),
                headers: Default::default(),
                body: None,
                open: true,
            }],
            exclusive: true,
        }
    }

    #[test]
    fn only_the_first_resolution_succeeds() {
        let registry = PendingRegistry::new();
        registry.insert("n1".into(), notification_with_actions());

        assert!(matches!(registry.resolve("n1", 0), ResolveOutcome::Resolved(_)));
        assert!(matches!(registry.resolve("n1", 0), ResolveOutcome::AlreadyResolved));
    }

    #[test]
    fn out_of_range_index_reports_invalid_not_silent_drop() {
        let registry = PendingRegistry::new();
        registry.insert("n1".into(), notification_with_actions());

        assert!(matches!(registry.resolve("n1", 9), ResolveOutcome::InvalidIndex));
        // the entry is consumed either way, so a retry is not silently stuck
        assert!(matches!(registry.resolve("n1", 0), ResolveOutcome::AlreadyResolved));
    }
}

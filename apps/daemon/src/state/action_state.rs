use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use notifier_model::ActionState;
use tracing::instrument;

/// Tracks each popup action button's transient state, keyed by
/// `(local_id, action_index)`.
pub struct ActionStateMap {
    states: Mutex<HashMap<(u64, usize), ActionState>>,
}

impl ActionStateMap {
    pub fn new() -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, local_id: u64, action_index: usize) -> ActionState {
        self.states
            .lock()
            .expect("action state lock poisoned")
            .get(&(local_id, action_index))
            .copied()
            .unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub fn set(&self, local_id: u64, action_index: usize, state: ActionState) {
        self.states
            .lock()
            .expect("action state lock poisoned")
            .insert((local_id, action_index), state);
    }

    pub fn clear(&self, local_id: u64, action_index: usize) {
        self.states
            .lock()
            .expect("action state lock poisoned")
            .remove(&(local_id, action_index));
    }

    pub fn clear_all_for_popup(&self, local_id: u64) {
        self.states
            .lock()
            .expect("action state lock poisoned")
            .retain(|(id, _), _| *id != local_id);
    }
}

impl Default for ActionStateMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Sets `state`, then after its hold duration (if any) reverts to idle,
/// unless the popup was dismissed first.
pub fn set_with_auto_revert(map: Arc<ActionStateMap>, local_id: u64, action_index: usize, state: ActionState) {
    map.set(local_id, action_index, state);
    if let Some(hold) = state.hold_duration() {
        tokio::spawn(async move {
            tokio::time::sleep(hold).await;
            if map.get(local_id, action_index) == state {
                map.set(local_id, action_index, ActionState::Idle);
            }
        });
    }
}

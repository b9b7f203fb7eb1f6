use std::collections::HashMap;
use std::sync::Mutex;

/// Maps a broker-assigned notification id to the local popup id the daemon
/// displayed it as, so an incoming `resolved` frame (keyed by server id)
/// can find the right popup.
///
/// Kept as its own dedicated lock rather than folded into an unrelated
/// shared map, since nothing else in this daemon needs to be coalesced
/// with it.
pub struct ServerIdMap {
    forward: Mutex<HashMap<String, u64>>,
}

impl ServerIdMap {
    pub fn new() -> Self {
        Self {
            forward: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, server_id: String, local_id: u64) {
        self.forward.lock().expect("server id map lock poisoned").insert(server_id, local_id);
    }

    pub fn local_id_for(&self, server_id: &str) -> Option<u64> {
        self.forward.lock().expect("server id map lock poisoned").get(server_id).copied()
    }

    pub fn remove_by_local_id(&self, local_id: u64) {
        self.forward
            .lock()
            .expect("server id map lock poisoned")
            .retain(|_, v| *v != local_id);
    }
}

impl Default for ServerIdMap {
    fn default() -> Self {
        Self::new()
    }
}

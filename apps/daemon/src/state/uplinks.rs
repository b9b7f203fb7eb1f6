use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc::UnboundedSender;

/// Tracks each connected broker's outbound frame sender, keyed by the
/// server name the connection was configured with, so an action click can
/// be sent back up to the broker that originated the notification.
pub struct UplinkRegistry {
    senders: Mutex<HashMap<String, UnboundedSender<String>>>,
}

impl UplinkRegistry {
    pub fn new() -> Self {
        Self {
            senders: Mutex::new(HashMap::new()),
        }
    }

    pub fn register(&self, server_name: String, sender: UnboundedSender<String>) {
        self.senders.lock().expect("uplink registry lock poisoned").insert(server_name, sender);
    }

    pub fn unregister(&self, server_name: &str) {
        self.senders.lock().expect("uplink registry lock poisoned").remove(server_name);
    }

    pub fn send(&self, server_name: &str, payload: String) -> bool {
        match self.senders.lock().expect("uplink registry lock poisoned").get(server_name) {
            Some(sender) => sender.send(payload).is_ok(),
            None => false,
        }
    }
}

impl Default for UplinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use std::collections::HashMap;

use tokio::sync::{broadcast, RwLock};
use tracing::{instrument, trace};
use uuid::Uuid;

/// Fan-out capacity: how many unconsumed frames a lagging daemon can fall
/// behind by before it starts missing broadcasts. Sized generously since a
/// notification burst is rare and a daemon reconnect replaces a lagged
/// receiver entirely.
const BROADCAST_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
pub struct ClientMeta {
    pub name: String,
}

/// Tracks connected daemon sockets and fans out frames to all of them.
///
/// The broadcast channel is the fan-out mechanism: each connected socket
/// owns its own receiver, so a send is lock-free and preserves per-receiver
/// order, which is what guarantees a later broadcast can never overtake an
/// earlier one addressed to the same socket.
pub struct ConnectionRegistry {
    clients: RwLock<HashMap<Uuid, ClientMeta>>,
    sender: broadcast::Sender<String>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        let (sender, _receiver) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            clients: RwLock::new(HashMap::new()),
            sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn register(&self, name: String) -> (Uuid, broadcast::Receiver<String>) {
        let id = Uuid::new_v4();
        self.clients.write().await.insert(id, ClientMeta { name });
        (id, self.sender.subscribe())
    }

    #[instrument(skip(self))]
    pub async fn unregister(&self, id: Uuid) {
        self.clients.write().await.remove(&id);
    }

    #[instrument(skip(self, payload))]
    pub fn broadcast(&self, payload: String) {
        match self.sender.send(payload) {
            Ok(subscriber_count) => trace!(subscriber_count, "frame fanned out"),
            Err(_) => trace!("frame discarded: no subscribers connected"),
        }
    }

    pub async fn connected_count(&self) -> usize {
        self.clients.read().await.len()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! Durable, file-backed storage for notifications shown in a daemon's
//! notification center.

mod error;
mod record;

pub use error::StoreError;
pub use record::StoredNotification;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use notifier_model::Notification;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    /// High-water mark so ids stay strictly increasing even after the
    /// highest-numbered entry has since been removed.
    #[serde(default)]
    next_id: i64,
    #[serde(default)]
    notifications: Vec<StoredNotification>,
}

struct StoreState {
    file: StoreFile,
}

/// A JSON-file-backed notification center store.
///
/// Reads and writes are serialized through an `RwLock`; persistence is
/// best-effort: a write-to-disk failure is logged and does not fail the
/// in-memory mutation, since the center is a convenience view, not the
/// system of record for notification delivery.
pub struct CenterStore {
    path: PathBuf,
    state: Arc<RwLock<StoreState>>,
}

impl CenterStore {
    /// Opens (or creates) the store backed by the JSON file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(StoreError::Corrupt)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreFile::default(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self {
            path,
            state: Arc::new(RwLock::new(StoreState { file })),
        })
    }

    /// Appends `payload`, assigning it a strictly increasing id.
    pub async fn append(&self, payload: Notification) -> StoredNotification {
        let mut guard = self.state.write().await;
        let id = guard.file.next_id;
        guard.file.next_id += 1;

        let entry = StoredNotification {
            id,
            payload,
            created_at: chrono::Utc::now(),
        };
        guard.file.notifications.push(entry.clone());

        self.persist(&guard.file).await;
        entry
    }

    /// Removes a single entry by id. Returns whether it was present.
    pub async fn remove(&self, id: i64) -> bool {
        let mut guard = self.state.write().await;
        let before = guard.file.notifications.len();
        guard.file.notifications.retain(|n| n.id != id);
        let removed = guard.file.notifications.len() != before;
        if removed {
            self.persist(&guard.file).await;
        }
        removed
    }

    /// Clears every entry, preserving the id high-water mark.
    pub async fn clear(&self) {
        let mut guard = self.state.write().await;
        guard.file.notifications.clear();
        self.persist(&guard.file).await;
    }

    pub async fn list(&self) -> Vec<StoredNotification> {
        self.state.read().await.file.notifications.clone()
    }

    pub async fn count(&self) -> usize {
        self.state.read().await.file.notifications.len()
    }

    async fn persist(&self, file: &StoreFile) {
        let serialized = match serde_json::to_vec_pretty(file) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize center store");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::error!(error = %e, path = %self.path.display(), "failed to create center store directory");
                return;
            }
        }
        if let Err(e) = tokio::fs::write(&self.path, serialized).await {
            tracing::error!(error = %e, path = %self.path.display(), "failed to persist center store");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Notification {
        Notification {
            id: None,
            source: "src".into(),
            title: "t".into(),
            message: "m".into(),
            icon_data: None,
            icon_href: None,
            icon_path: None,
            duration: 5000,
            actions: vec![],
            exclusive: false,
        }
    }

    #[tokio::test]
    async fn append_assigns_monotonic_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = CenterStore::open(dir.path().join("notifications.json")).await.unwrap();
        let first = store.append(sample()).await;
        let second = store.append(sample()).await;
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn ids_stay_increasing_across_reload_even_after_removal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notifications.json");

        let store = CenterStore::open(&path).await.unwrap();
        let first = store.append(sample()).await;
        store.remove(first.id).await;

        let reopened = CenterStore::open(&path).await.unwrap();
        let next = reopened.append(sample()).await;
        assert!(next.id > first.id);
    }

    #[tokio::test]
    async fn remove_reports_whether_entry_existed() {
        let dir = tempfile::tempdir().unwrap();
        let store = CenterStore::open(dir.path().join("notifications.json")).await.unwrap();
        let entry = store.append(sample()).await;
        assert!(store.remove(entry.id).await);
        assert!(!store.remove(entry.id).await);
    }
}

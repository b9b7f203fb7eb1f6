use chrono::{DateTime, Utc};
use notifier_model::Notification;
use serde::{Deserialize, Serialize};

/// A notification as persisted in the center store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredNotification {
    pub id: i64,
    pub payload: Notification,
    pub created_at: DateTime<Utc>,
}

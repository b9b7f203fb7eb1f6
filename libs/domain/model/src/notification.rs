use serde::{Deserialize, Serialize};

use crate::{Action, ModelError};

/// A notification as it travels over the wire between a submitter, the
/// broker, and a daemon.
///
/// Icon precedence when more than one field is present: `icon_data` wins
/// over `icon_href`, which wins over `icon_path`. The broker resolves
/// `icon_href` into `icon_data` before fan-out (see `notifier-broker`'s
/// icon normalization service) and strips `icon_href` once resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Assigned by the broker on receipt; absent on the inbound POST body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    /// Seconds the popup should remain visible. Zero or absent means the
    /// popup is persistent (it never expires on its own); negative values
    /// are clamped to zero. Neither case is a validation error.
    #[serde(default = "default_duration")]
    pub duration: i64,
    #[serde(default)]
    pub actions: Vec<Action>,
    /// When true, only one daemon's action click is honored; the rest are
    /// told the notification was already resolved.
    #[serde(default)]
    pub exclusive: bool,
}

fn default_duration() -> i64 {
    0
}

impl Notification {
    /// Validates invariants that must hold before a notification is
    /// admitted by the broker or accepted by the daemon's ingress pipeline.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() && self.message.trim().is_empty() {
            return Err(ModelError::EmptyNotification);
        }
        Ok(())
    }

    /// The effective icon, applying the documented precedence order.
    pub fn effective_icon(&self) -> Option<&str> {
        self.icon_data
            .as_deref()
            .or(self.icon_href.as_deref())
            .or(self.icon_path.as_deref())
    }

    pub fn action_at(&self, index: usize) -> Result<&Action, ModelError> {
        self.actions
            .get(index)
            .ok_or_else(|| ModelError::ActionIndexOutOfRange(index, self.actions.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Notification {
        Notification {
            id: None,
            source: "test".into(),
            title: "hello".into(),
            message: String::new(),
            icon_data: None,
            icon_href: None,
            icon_path: None,
            duration: 5_000,
            actions: vec![],
            exclusive: false,
        }
    }

    #[test]
    fn rejects_empty_title_and_message() {
        let mut n = base();
        n.title.clear();
        assert!(matches!(n.validate(), Err(ModelError::EmptyNotification)));
    }

    #[test]
    fn zero_duration_is_not_an_error() {
        let mut n = base();
        n.duration = 0;
        assert!(n.validate().is_ok());
    }

    #[test]
    fn icon_precedence_prefers_data_over_href_over_path() {
        let mut n = base();
        n.icon_path = Some("path".into());
        n.icon_href = Some("href".into());
        n.icon_data = Some("data".into());
        assert_eq!(n.effective_icon(), Some("data"));
        n.icon_data = None;
        assert_eq!(n.effective_icon(), Some("href"));
        n.icon_href = None;
        assert_eq!(n.effective_icon(), Some("path"));
    }

    #[test]
    fn out_of_range_action_index_is_reported() {
        let n = base();
        assert!(matches!(
            n.action_at(0),
            Err(ModelError::ActionIndexOutOfRange(0, 0))
        ));
    }
}

use notifier_model::{Action, Notification};
use serde::{Deserialize, Serialize};

/// The set of frame types carried over the broker/daemon WebSocket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FrameType {
    Notification,
    Action,
    Resolved,
}

/// An action click reported by a daemon back to the broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionFrame {
    pub id: String,
    pub action_index: usize,
}

/// The broker's verdict on an exclusive notification's action click,
/// broadcast to every connected daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedFrame {
    pub id: String,
    /// Name of the daemon connection whose click won the resolution race.
    pub resolved_by: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The resolved action itself, so a daemon that still shows the popup
    /// can decide whether to open its URL locally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

/// A decoded wire frame, tagged with its type for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Frame {
    Notification(Notification),
    Action(ActionFrame),
    Resolved(ResolvedFrame),
}

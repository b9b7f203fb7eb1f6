use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single action offered alongside a notification (e.g. a button label).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    /// Target URL. When `open` is true this is opened locally; otherwise it
    /// is the endpoint a resolution sends `method`/`headers`/`body` to.
    pub url: String,
    /// HTTP method used when the action is executed as a request (`open`
    /// false); upper-cased, defaults to `GET`.
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// When true, a successful resolution should also open `url` on
    /// whichever daemon still displays the popup, instead of sending a
    /// request.
    #[serde(default)]
    pub open: bool,
}

fn default_method() -> String {
    "GET".to_string()
}

/// Local, transient state of an action's button while it is mid-flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActionState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl ActionState {
    /// How long a terminal state should be displayed before reverting to idle.
    pub fn hold_duration(self) -> Option<std::time::Duration> {
        match self {
            ActionState::Success => Some(std::time::Duration::from_millis(300)),
            ActionState::Error => Some(std::time::Duration::from_millis(100)),
            ActionState::Idle | ActionState::Loading => None,
        }
    }
}

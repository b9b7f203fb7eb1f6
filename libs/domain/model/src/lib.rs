//! Wire and domain types shared between the broker and the daemon.

mod action;
mod classify;
mod error;
mod notification;
mod rule;
mod server;

pub use action::{Action, ActionState};
pub use classify::{classify, Classification};
pub use error::ModelError;
pub use notification::Notification;
pub use rule::{Rule, RuleAction, RulesConfig};
pub use server::ServerEntry;

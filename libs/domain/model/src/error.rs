use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("[MODEL_VALIDATION]: notification must have a non-empty title or message")]
    EmptyNotification,

    #[error("[MODEL_VALIDATION]: action index {0} is out of range (have {1} actions)")]
    ActionIndexOutOfRange(usize, usize),

    #[error("[MODEL_RULE]: invalid pattern regex: {0}")]
    InvalidPattern(#[from] regex::Error),
}

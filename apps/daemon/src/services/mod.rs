pub mod action_executor;
pub mod expiration;
pub mod ingress;

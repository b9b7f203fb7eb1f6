//! The cross-notifier daemon: connects to one or more brokers, filters and
//! displays notifications locally, and exposes a loopback HTTP surface for
//! local submission and center management.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod kernel;
pub mod routes;
pub mod services;
pub mod state;

pub mod prelude {
    pub use crate::cli::DaemonCli;
    pub use crate::kernel::DaemonKernel;
    pub use crate::state::AppState;
}

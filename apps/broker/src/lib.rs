//! The cross-notifier broker: accepts notifications over HTTP and fans
//! them out to connected daemons over WebSocket, coordinating exclusive
//! notification resolution between them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod kernel;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub mod prelude {
    pub use crate::config::BrokerConfig;
    pub use crate::kernel::BrokerKernel;
    pub use crate::state::AppState;
}

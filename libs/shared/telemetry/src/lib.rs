//! Telemetry bootstrap shared by the broker and daemon binaries.

use std::panic;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global `tracing` subscriber and panic hook for `service_name`.
///
/// Filter defaults to `info` for this crate's own target and `warn` for
/// everything else, overridable via `RUST_LOG`. Debug builds use a compact,
/// human-readable formatter; release builds emit JSON suitable for log
/// aggregation.
pub fn init_tracing(service_name: &str) {
    let default_directive = format!("{service_name}=info,warn");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(filter);

    if cfg!(debug_assertions) {
        registry.with(fmt::layer().compact().with_target(false)).init();
    } else {
        registry.with(fmt::layer().json().with_current_span(true)).init();
    }

    install_panic_hook();
}

fn install_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());
        tracing::error!(target: "panic_monitor", location = %location, "{panic_info}");
    }));
}

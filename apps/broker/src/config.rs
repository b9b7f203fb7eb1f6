use clap::Parser;

/// Command-line configuration for the broker binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "notifier-broker", about = "Cross-host notification fan-out broker")]
pub struct BrokerConfig {
    /// Port to bind the HTTP/WebSocket listener on.
    #[arg(long, env = "CROSS_NOTIFIER_PORT", default_value_t = 9876)]
    pub port: u16,

    /// Shared secret daemons must present as a Bearer token.
    #[arg(long, env = "CROSS_NOTIFIER_SECRET")]
    pub secret: String,
}

use clap::Parser;

/// Command-line configuration for the daemon binary.
///
/// `--setup`, `--center`, `--install-autostart`, and `--uninstall-autostart`
/// are accepted so existing launcher scripts don't fail to start the
/// binary, but their bodies belong to the (unbuilt) UI layer: the daemon
/// logs that the feature lives there and exits successfully.
#[derive(Debug, Clone, Parser)]
#[command(name = "notifier-daemon", about = "Cross-host notification receiver")]
pub struct DaemonCli {
    /// Loopback HTTP port for local submission and center management.
    #[arg(long, default_value_t = 9876)]
    pub port: u16,

    /// Broker WebSocket URL to connect to. Repeatable.
    #[arg(long = "connect")]
    pub connect: Vec<String>,

    /// Shared secret for the broker connection(s).
    #[arg(long, env = "CROSS_NOTIFIER_SECRET")]
    pub secret: Option<String>,

    /// Name this daemon advertises to brokers via X-Client-Name.
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub setup: bool,

    #[arg(long)]
    pub center: bool,

    #[arg(long = "install-autostart")]
    pub install_autostart: bool,

    #[arg(long = "uninstall-autostart")]
    pub uninstall_autostart: bool,
}

impl DaemonCli {
    /// True if this invocation is one of the out-of-scope UI collaborator
    /// commands rather than a request to run the daemon core.
    pub fn is_collaborator_command(&self) -> bool {
        self.setup || self.center || self.install_autostart || self.uninstall_autostart
    }
}

use clap::Parser;
use notifier_daemon::prelude::{DaemonCli, DaemonKernel};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    notifier_telemetry::init_tracing("notifier_daemon");

    let cli = DaemonCli::parse();

    if cli.is_collaborator_command() {
        info!("this flag belongs to the desktop UI layer, which this build does not include");
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_stack_size(4 * 1024 * 1024)
        .build()?;

    runtime.block_on(async { DaemonKernel::ignite(cli).await.launch().await })?;
    Ok(())
}

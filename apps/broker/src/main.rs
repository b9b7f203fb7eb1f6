use clap::Parser;
use notifier_broker::prelude::{BrokerConfig, BrokerKernel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    notifier_telemetry::init_tracing("notifier_broker");

    let config = BrokerConfig::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_stack_size(4 * 1024 * 1024)
        .build()?;

    runtime.block_on(async { BrokerKernel::ignite(config).serve().await })?;
    Ok(())
}

use clap::Parser;
use tracing::info;

mod cli;
mod config;
mod core;
mod extractors;
mod sinks;
mod utils;

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    info!("Starting tunelink v{}", env!("CARGO_PKG_VERSION"));

    cli.run().await?;

    Ok(())
}

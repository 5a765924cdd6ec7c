//! Binary crate for the `weatherforecast` command.
//!
//! This crate focuses on:
//! - Parsing command arguments
//! - Interactive configuration
//! - Printing the rendered forecast as the reply

use clap::Parser;
use forecast_core::Config;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the reply.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    let config = Config::load()?;
    cmd.run(config).await
}

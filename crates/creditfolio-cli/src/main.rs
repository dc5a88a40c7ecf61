//! Creditfolio CLI - bond and CDS portfolio analytics.
//!
//! # Usage
//!
//! ```bash
//! # Summarize the bundled portfolio
//! creditfolio summary
//!
//! # Per-security metrics over one year of history
//! creditfolio metrics --lookback 1y
//!
//! # Full run as JSON with a custom configuration
//! creditfolio --config creditfolio.toml --format json run
//!
//! # Write the CSV tables
//! creditfolio export --output-dir out/
//!
//! # Rating lookups
//! creditfolio rating BBB-
//! creditfolio rating 7.3
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable.
    let default_filter = if cli.quiet { "warn" } else { "info,creditfolio=debug" };
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = Context::from_cli(&cli)?;

    match cli.command {
        Commands::Summary(args) => commands::summary::execute(args, &ctx)?,
        Commands::Metrics(args) => commands::metrics::execute(args, &ctx).await?,
        Commands::Correlation(args) => commands::correlation::execute(args, &ctx).await?,
        Commands::Run(args) => commands::run::execute(args, &ctx).await?,
        Commands::Export(args) => commands::export::execute(args, &ctx).await?,
        Commands::Rating(args) => commands::rating::execute(args, &ctx)?,
    }

    Ok(())
}

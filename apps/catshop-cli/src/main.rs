//! # catshop CLI Entry Point
//!
//! Loads configuration, installs logging, and dispatches the command.

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catshop_cli::config::CliConfig;
use catshop_cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = CliConfig::load()?;

    // Initialize tracing (stderr only, stdout carries results)
    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid CATSHOP_LOG directive '{}'", config.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!(
        fixed_now = ?config.fixed_now,
        pretty_json = config.pretty_json,
        "configuration loaded"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    catshop_cli::run(&cli, &config, &mut out)?;

    Ok(())
}

//! Applymail command-line entry point.

use anyhow::{Context, Result};
use applymail::cli::{Cli, Command};
use applymail::{AppConfig, commands};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(storage) = &cli.storage {
        config.storage_path = Some(storage.clone());
    }

    let default_filter = if cli.verbose { "debug" } else { config.log_level.as_str() };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!(?config, "configuration loaded");

    let output = match &cli.command {
        Command::Render(args) => commands::render(args, &config)?,
        Command::Variables(args) => commands::variables(args, &config)?,
        Command::Favorite { name } => commands::favorite(name, &config)?,
        Command::Tokens { template } => commands::tokens(template)?,
    };
    print!("{output}");

    Ok(())
}

//! go2web entry point.
//!
//! Logging goes to stderr so stdout carries only the rendered page or the
//! search listing.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use go2web_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;

use args::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.is_empty() {
        Args::command().print_help()?;
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::debug!(cache_dir = %config.cache_dir.display(), "configuration loaded");

    if args.clear_cache {
        commands::clear_cache(&config);
        return Ok(());
    }

    commands::run(&args, &config).await;

    Ok(())
}

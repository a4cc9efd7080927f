//! Strictly Games - tic-tac-toe CLI

use anyhow::Result;
use clap::Parser;
use strictly_games::{Cli, Settings, execute};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?
        .with_overrides(cli.storage_dir.clone(), cli.key.clone());
    debug!(?settings, "Settings resolved");

    let output = execute(&cli.command, &settings)?;
    println!("{}", output);
    Ok(())
}

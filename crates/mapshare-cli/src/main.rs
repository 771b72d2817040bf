mod cli;
mod commands;
mod completions;
mod config;
mod error;
mod output;
mod setup;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use mapshare_core::paths;
use setup::prepare_core;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        error::handle_error(err);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Completions { shell }) = cli.command {
        completions::generate_completions(shell);
        return Ok(());
    }

    // Log to a file so command output stays clean
    let log_dir = paths::logs_dir()?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "mapshare.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    let config = config::CliConfig::load();
    let db_path = cli.db_path.or_else(|| config.default.db_path.clone());
    let core = prepare_core(db_path).await?;
    commands::run(core, cli.command, &config, cli.format).await
}

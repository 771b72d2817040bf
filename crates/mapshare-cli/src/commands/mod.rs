pub mod auth;
pub mod config;
pub mod map;
pub mod profile;
pub mod utils;

use anyhow::Result;
use mapshare_core::AppCore;
use std::sync::Arc;

use crate::cli::{Commands, MapCommands};
use crate::config::CliConfig;
use crate::output::OutputFormat;

/// Dispatch a parsed command. No command lists maps.
pub async fn run(
    core: Arc<AppCore>,
    command: Option<Commands>,
    config: &CliConfig,
    format: OutputFormat,
) -> Result<()> {
    let command = command.unwrap_or(Commands::Map {
        command: MapCommands::List {
            sort: None,
            tags: Vec::new(),
        },
    });

    match command {
        Commands::Register(args) => auth::register(core, args, format).await,
        Commands::Login(args) => auth::login(core, args, format).await,
        Commands::Logout => auth::logout(core, format).await,
        Commands::Whoami => auth::whoami(core, format).await,
        Commands::Passwd(args) => auth::change_password(core, args, format).await,
        Commands::Map { command } => map::run(core, command, config, format).await,
        Commands::Profile(args) => profile::run(core, args, format).await,
        Commands::Config { command } => config::run(core, command, format).await,
        Commands::Completions { shell } => {
            crate::completions::generate_completions(shell);
            Ok(())
        }
    }
}

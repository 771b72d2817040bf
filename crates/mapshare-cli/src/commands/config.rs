use anyhow::Result;
use comfy_table::{Cell, Table};
use mapshare_core::{AppCore, services::config as config_service, storage::SystemConfig};
use std::sync::Arc;

use crate::cli::ConfigCommands;
use crate::output::{OutputFormat, json::print_json, table::print_table};

pub async fn run(core: Arc<AppCore>, command: ConfigCommands, format: OutputFormat) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = config_service::get_config(&core).await?;
            print_config(&config, format)
        }
        ConfigCommands::Set { key, value } => {
            let config = config_service::set_config_value(&core, &key, &value).await?;
            if format.is_json() {
                return print_json(&config);
            }
            println!("Updated {} = {}", key, value);
            Ok(())
        }
    }
}

fn print_config(config: &SystemConfig, format: OutputFormat) -> Result<()> {
    if format.is_json() {
        return print_json(config);
    }

    let mut table = Table::new();
    table.set_header(vec![Cell::new("Key"), Cell::new("Value")]);
    table.add_row(vec![
        Cell::new("auth_delay_ms"),
        Cell::new(config.auth_delay_ms),
    ]);
    table.add_row(vec![
        Cell::new("strict_credentials"),
        Cell::new(config.strict_credentials),
    ]);
    print_table(table)
}

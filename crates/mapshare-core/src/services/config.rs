use crate::AppCore;
use crate::storage::SystemConfig;
use anyhow::{Context, Result};
use std::sync::Arc;

// Get complete system configuration
pub async fn get_config(core: &Arc<AppCore>) -> Result<SystemConfig> {
    match core
        .storage
        .config
        .get_config()
        .context("Failed to get config")?
    {
        Some(config) => Ok(config),
        None => Ok(SystemConfig::default()),
    }
}

// Update system configuration with validation
pub async fn update_config(core: &Arc<AppCore>, config: SystemConfig) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    core.storage
        .config
        .update_config(config)
        .context("Failed to update config")
}

/// Set a single configuration value by key name and return the new config.
pub async fn set_config_value(
    core: &Arc<AppCore>,
    key: &str,
    value: &str,
) -> Result<SystemConfig> {
    let mut config = get_config(core).await?;
    config.set_value(key, value)?;
    update_config(core, config.clone()).await?;
    Ok(config)
}

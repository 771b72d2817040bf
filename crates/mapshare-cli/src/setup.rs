//! CLI setup module
//!
//! Handles initialization of the Mapshare core for CLI usage.

use anyhow::{Context, Result};
use mapshare_core::{AppCore, paths};
use std::sync::Arc;

/// Open the embedded Mapshare core
pub async fn prepare_core(db_path: Option<String>) -> Result<Arc<AppCore>> {
    let db_path = match db_path {
        Some(path) => path,
        None => paths::ensure_database_path_string()?,
    };
    let core = AppCore::new(&db_path)
        .await
        .with_context(|| format!("Failed to open database at {}", db_path))?;
    Ok(Arc::new(core))
}

//! Path utilities for Mapshare directory resolution.
//!
//! This is the canonical source for shared path functions. Re-exported by
//! mapshare-core for convenience.

use anyhow::Result;
use std::path::PathBuf;

const MAPSHARE_DIR: &str = ".mapshare";
const DB_FILE: &str = "mapshare.db";
const LOGS_DIR: &str = "logs";

/// Environment variable to override the Mapshare directory.
const MAPSHARE_DIR_ENV: &str = "MAPSHARE_DIR";

/// Resolve the Mapshare data directory.
/// Priority: MAPSHARE_DIR env var > ~/.mapshare/
pub fn resolve_mapshare_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(MAPSHARE_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|h| h.join(MAPSHARE_DIR))
        .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))
}

/// Ensure the Mapshare directory exists and return its path.
pub fn ensure_mapshare_dir() -> Result<PathBuf> {
    let dir = resolve_mapshare_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Ensure the data directory exists and return the database path as a string.
pub fn ensure_database_path_string() -> Result<String> {
    Ok(ensure_mapshare_dir()?
        .join(DB_FILE)
        .to_string_lossy()
        .into_owned())
}

/// Get the logs directory: ~/.mapshare/logs/
pub fn logs_dir() -> Result<PathBuf> {
    let dir = resolve_mapshare_dir()?.join(LOGS_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

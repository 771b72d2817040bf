//! Storage layer with typed wrappers around mapshare-storage.
//!
//! This module provides type-safe access to the storage layer by wrapping
//! the byte-level APIs from mapshare-storage with the models of this crate.

pub mod state;

use anyhow::Result;
use redb::Database;
use std::sync::Arc;

// Re-export types that are self-contained in mapshare-storage
pub use mapshare_storage::{ConfigStorage, StateKey, SystemConfig};

pub use state::{CatalogSnapshot, SCHEMA_VERSION, StateStorage};

/// Central storage manager that initializes all storage subsystems.
pub struct Storage {
    pub config: ConfigStorage,
    pub state: StateStorage,
}

impl Storage {
    /// Create a new storage instance at the given path.
    pub fn new(path: &str) -> Result<Self> {
        let db = Arc::new(Database::create(path)?);

        let config = ConfigStorage::new(db.clone())?;
        let state = StateStorage::new(db.clone())?;

        Ok(Self { config, state })
    }
}

//! System configuration storage.

use anyhow::Result;
use redb::{Database, ReadableDatabase, TableDefinition};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const CONFIG_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("system_config");

// Default configuration constants
const DEFAULT_AUTH_DELAY_MS: u64 = 1000;
const MAX_AUTH_DELAY_MS: u64 = 60_000;

/// System configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Artificial delay before mock identity operations complete.
    pub auth_delay_ms: u64,
    /// Reject malformed emails and blank usernames/passwords.
    pub strict_credentials: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            auth_delay_ms: DEFAULT_AUTH_DELAY_MS,
            strict_credentials: false,
        }
    }
}

impl SystemConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.auth_delay_ms > MAX_AUTH_DELAY_MS {
            return Err(anyhow::anyhow!(
                "Auth delay must be at most {} ms",
                MAX_AUTH_DELAY_MS
            ));
        }

        Ok(())
    }

    /// Set a configuration value by its key name.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "auth_delay_ms" => {
                self.auth_delay_ms = value
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid auth_delay_ms: {}", value))?;
            }
            "strict_credentials" => {
                self.strict_credentials = value
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid strict_credentials: {}", value))?;
            }
            _ => return Err(anyhow::anyhow!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

/// Configuration storage
#[derive(Clone)]
pub struct ConfigStorage {
    db: Arc<Database>,
}

impl ConfigStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        // Create table
        let write_txn = db.begin_write()?;
        write_txn.open_table(CONFIG_TABLE)?;
        write_txn.commit()?;

        let storage = Self { db };

        // Set default config if not exists
        if storage.get_config()?.is_none() {
            storage.update_config(SystemConfig::default())?;
        }

        Ok(storage)
    }

    /// Get system configuration
    pub fn get_config(&self) -> Result<Option<SystemConfig>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CONFIG_TABLE)?;

        if let Some(data) = table.get("system")? {
            let config: SystemConfig = serde_json::from_slice(data.value())?;
            Ok(Some(config))
        } else {
            Ok(None)
        }
    }

    /// Update system configuration
    pub fn update_config(&self, config: SystemConfig) -> Result<()> {
        // Validate before saving
        config.validate()?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CONFIG_TABLE)?;
            let serialized = serde_json::to_vec(&config)?;
            table.insert("system", serialized.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup_test_storage() -> (ConfigStorage, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Arc::new(Database::create(db_path).unwrap());
        let storage = ConfigStorage::new(db).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_default_config() {
        let (storage, _temp_dir) = setup_test_storage();

        let config = storage.get_config().unwrap().unwrap();
        assert_eq!(config.auth_delay_ms, DEFAULT_AUTH_DELAY_MS);
        assert!(!config.strict_credentials);
    }

    #[test]
    fn test_update_config() {
        let (storage, _temp_dir) = setup_test_storage();

        storage
            .update_config(SystemConfig {
                auth_delay_ms: 0,
                strict_credentials: true,
            })
            .unwrap();

        let retrieved = storage.get_config().unwrap().unwrap();
        assert_eq!(retrieved.auth_delay_ms, 0);
        assert!(retrieved.strict_credentials);
    }

    #[test]
    fn test_invalid_auth_delay() {
        let (storage, _temp_dir) = setup_test_storage();

        let result = storage.update_config(SystemConfig {
            auth_delay_ms: MAX_AUTH_DELAY_MS + 1,
            strict_credentials: false,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_set_value() {
        let mut config = SystemConfig::default();

        config.set_value("auth_delay_ms", "250").unwrap();
        config.set_value("strict_credentials", "true").unwrap();
        assert_eq!(config.auth_delay_ms, 250);
        assert!(config.strict_credentials);

        assert!(config.set_value("auth_delay_ms", "soon").is_err());
        assert!(config.set_value("worker_count", "4").is_err());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: SystemConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SystemConfig::default());
    }
}

pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{CatalogError, CorruptStateError, IdentityError, StateError};
pub use models::*;
pub use services::{CatalogStore, IdentityStore};

/// Path helpers, shared with mapshare-storage.
pub use mapshare_storage::paths;

use std::sync::Arc;
use storage::Storage;
use tracing::info;

/// Core application state shared by every front end.
///
/// Owns the two stores for the lifetime of the process:
/// - `identity`: the active identity (register/login/logout)
/// - `catalog`: map entries with like/save relations and comments
pub struct AppCore {
    pub storage: Arc<Storage>,
    pub identity: IdentityStore,
    pub catalog: CatalogStore,
}

impl AppCore {
    pub async fn new(db_path: &str) -> anyhow::Result<Self> {
        let storage = Arc::new(Storage::new(db_path)?);

        let identity = storage.state.load_identity()?;
        let catalog = storage.state.load_catalog()?;
        info!(
            maps = catalog.maps.len(),
            logged_in = identity.is_some(),
            "Initializing Mapshare"
        );

        Ok(Self {
            identity: IdentityStore::new(
                storage.state.clone(),
                storage.config.clone(),
                identity,
            ),
            catalog: CatalogStore::new(storage.state.clone(), catalog),
            storage,
        })
    }

    /// The active identity, or an error naming the refused action.
    pub fn require_identity(&self, action: &str) -> anyhow::Result<Identity> {
        self.identity
            .current()
            .ok_or_else(|| anyhow::anyhow!("You must be logged in to {}", action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_core_reloads_state_from_disk() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("mapshare.db");
        let db_path = db_path.to_str().unwrap();

        let map_id = {
            let core = AppCore::new(db_path).await.unwrap();
            let mut config = core.storage.config.get_config().unwrap().unwrap();
            config.auth_delay_ms = 0;
            core.storage.config.update_config(config).unwrap();

            let alice = core
                .identity
                .register("alice", "alice@example.com", "pw")
                .await
                .unwrap();
            let entry = core
                .catalog
                .add_entry(NewMapEntry {
                    name: "Parkour1".to_string(),
                    code: "1111-2222".to_string(),
                    description: "Jumps".to_string(),
                    image_url: "https://img.example/p.png".to_string(),
                    tags: vec!["parkour".to_string()],
                    uploaded_by: alice.username.clone(),
                })
                .unwrap();
            core.catalog.like(&entry.id, &alice.id).unwrap();
            entry.id
        };

        let core = AppCore::new(db_path).await.unwrap();
        let alice = core.require_identity("like maps").unwrap();
        assert_eq!(alice.username, "alice");
        assert!(core.catalog.has_liked(&map_id, &alice.id));
        assert_eq!(core.catalog.get(&map_id).unwrap().likes, 1);
    }

    #[tokio::test]
    async fn test_require_identity_refuses_anonymous() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("mapshare.db");
        let core = AppCore::new(db_path.to_str().unwrap()).await.unwrap();

        let err = core.require_identity("upload a map").unwrap_err();
        assert_eq!(err.to_string(), "You must be logged in to upload a map");
    }
}

//! Typed snapshot storage for the identity and catalog stores.
//!
//! Every value is wrapped as `{"version": N, "data": ...}`. Values written by
//! a newer schema, or with a shape this build cannot read, fail to load with
//! [`CorruptStateError`] instead of being silently dropped.

use anyhow::Result;
use redb::Database;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{CorruptStateError, StateError};
use crate::models::{Identity, MapEntry, RelationSet};
use mapshare_storage::StateKey;

/// Current snapshot schema version.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct RawEnvelope {
    version: u32,
    data: serde_json::Value,
}

/// Everything the catalog store owns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub maps: Vec<MapEntry>,
    pub likes: RelationSet,
    pub saves: RelationSet,
}

impl CatalogSnapshot {
    /// Reset every entry's like counter to the size of its like relation.
    ///
    /// Returns the number of entries whose counter changed.
    pub fn reconcile_likes(&mut self) -> usize {
        let mut corrected = 0;
        for entry in &mut self.maps {
            let derived = self.likes.count_containing(&entry.id) as u64;
            if entry.likes != derived {
                tracing::warn!(
                    map_id = %entry.id,
                    stored = entry.likes,
                    derived,
                    "Like counter out of sync with like relation"
                );
                entry.likes = derived;
                corrected += 1;
            }
        }
        corrected
    }
}

/// Typed wrapper around mapshare-storage::StateStorage.
#[derive(Debug, Clone)]
pub struct StateStorage {
    inner: mapshare_storage::StateStorage,
}

impl StateStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        Ok(Self {
            inner: mapshare_storage::StateStorage::new(db)?,
        })
    }

    /// Load the active identity, if any.
    pub fn load_identity(&self) -> Result<Option<Identity>, StateError> {
        self.load(StateKey::User)
    }

    /// Persist the active identity.
    pub fn save_identity(&self, identity: &Identity) -> Result<()> {
        let bytes = encode(identity)?;
        self.inner.put_key(StateKey::User, &bytes)
    }

    /// Remove the persisted identity.
    pub fn clear_identity(&self) -> Result<()> {
        self.inner.clear_key(StateKey::User)?;
        Ok(())
    }

    /// Load the catalog; missing keys load as empty.
    pub fn load_catalog(&self) -> Result<CatalogSnapshot, StateError> {
        Ok(CatalogSnapshot {
            maps: self.load(StateKey::Maps)?.unwrap_or_default(),
            likes: self.load(StateKey::UserLikes)?.unwrap_or_default(),
            saves: self.load(StateKey::UserSaves)?.unwrap_or_default(),
        })
    }

    /// Persist the full catalog in one transaction.
    pub fn save_catalog(&self, catalog: &CatalogSnapshot) -> Result<()> {
        let maps = encode(&catalog.maps)?;
        let likes = encode(&catalog.likes)?;
        let saves = encode(&catalog.saves)?;
        self.inner.put_keys(&[
            (StateKey::Maps, maps.as_slice()),
            (StateKey::UserLikes, likes.as_slice()),
            (StateKey::UserSaves, saves.as_slice()),
        ])
    }

    fn load<T: DeserializeOwned>(&self, key: StateKey) -> Result<Option<T>, StateError> {
        match self.inner.get_key(key)? {
            Some(bytes) => Ok(Some(decode(key, &bytes)?)),
            None => Ok(None),
        }
    }

    #[cfg(test)]
    fn put_raw(&self, key: StateKey, bytes: &[u8]) -> Result<()> {
        self.inner.put_key(key, bytes)
    }
}

fn encode<T: Serialize>(data: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&EnvelopeRef {
        version: SCHEMA_VERSION,
        data,
    })?)
}

fn decode<T: DeserializeOwned>(key: StateKey, bytes: &[u8]) -> Result<T, CorruptStateError> {
    let envelope: RawEnvelope = serde_json::from_slice(bytes)
        .map_err(|e| CorruptStateError::new(key, format!("invalid envelope: {e}")))?;

    if envelope.version == 0 || envelope.version > SCHEMA_VERSION {
        return Err(CorruptStateError::new(
            key,
            format!(
                "unsupported schema version {} (supported: {})",
                envelope.version, SCHEMA_VERSION
            ),
        ));
    }

    serde_json::from_value(envelope.data)
        .map_err(|e| CorruptStateError::new(key, format!("invalid data: {e}")))
}

//! Application state storage - the four logical keys the stores snapshot into.

use crate::define_simple_storage;
use anyhow::Result;
use std::fmt;

define_simple_storage! {
    /// Application state storage with byte-level API.
    pub struct StateStorage { table: "app_state" }
}

/// Logical keys of the persisted state layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    /// Active identity, absent when logged out.
    User,
    /// Ordered collection of map entries.
    Maps,
    /// User ID to liked map IDs.
    UserLikes,
    /// User ID to saved map IDs.
    UserSaves,
}

impl StateKey {
    pub const ALL: [StateKey; 4] = [
        StateKey::User,
        StateKey::Maps,
        StateKey::UserLikes,
        StateKey::UserSaves,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StateKey::User => "user",
            StateKey::Maps => "maps",
            StateKey::UserLikes => "userLikes",
            StateKey::UserSaves => "userSaves",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateStorage {
    /// Read the raw snapshot stored under a logical key.
    pub fn get_key(&self, key: StateKey) -> Result<Option<Vec<u8>>> {
        self.get_raw(key.as_str())
    }

    /// Overwrite the snapshot stored under a logical key.
    pub fn put_key(&self, key: StateKey, data: &[u8]) -> Result<()> {
        tracing::debug!(key = %key, bytes = data.len(), "Writing state snapshot");
        self.put_raw(key.as_str(), data)
    }

    /// Overwrite several snapshots in one transaction.
    pub fn put_keys(&self, entries: &[(StateKey, &[u8])]) -> Result<()> {
        let raw: Vec<(&str, &[u8])> = entries
            .iter()
            .map(|(key, data)| (key.as_str(), *data))
            .collect();
        tracing::debug!(keys = raw.len(), "Writing state snapshots");
        self.put_many_raw(&raw)
    }

    /// Remove the snapshot stored under a logical key.
    pub fn clear_key(&self, key: StateKey) -> Result<bool> {
        self.delete(key.as_str())
    }
}

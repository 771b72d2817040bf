//! Per-user relation sets (likes, saves).
//!
//! Serialized as a JSON object keyed by user ID (sorted), each value a
//! sorted, duplicate-free array of map IDs. Duplicates in stored arrays
//! collapse on load.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use ts_rs::TS;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub struct RelationSet(BTreeMap<String, BTreeSet<String>>);

impl RelationSet {
    /// Add `map_id` to the user's set. Returns true if it was not there.
    pub fn insert(&mut self, user_id: &str, map_id: &str) -> bool {
        self.0
            .entry(user_id.to_string())
            .or_default()
            .insert(map_id.to_string())
    }

    /// Remove `map_id` from the user's set. Returns true if it was there.
    pub fn remove(&mut self, user_id: &str, map_id: &str) -> bool {
        let Some(set) = self.0.get_mut(user_id) else {
            return false;
        };
        let removed = set.remove(map_id);
        if set.is_empty() {
            self.0.remove(user_id);
        }
        removed
    }

    pub fn contains(&self, user_id: &str, map_id: &str) -> bool {
        self.0
            .get(user_id)
            .is_some_and(|set| set.contains(map_id))
    }

    /// Number of users whose set contains `map_id`.
    pub fn count_containing(&self, map_id: &str) -> usize {
        self.0
            .values()
            .filter(|set| set.contains(map_id))
            .count()
    }
}

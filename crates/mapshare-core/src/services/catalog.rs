//! Catalog store: map entries plus per-user like and save relations.
//!
//! The like relation is the source of truth for "has this user liked this
//! map"; each entry's `likes` counter only moves when set membership does.
//! Every mutation rewrites the full catalog snapshot before it becomes
//! visible, so a failed write leaves the in-memory state untouched.

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::models::{
    Comment, Identity, MapEntry, NewMapEntry, ProfileView, SortCriterion, ValidationError,
    fold_case,
};
use crate::storage::{CatalogSnapshot, StateStorage};
use mapshare_storage::time_utils;

pub struct CatalogStore {
    state: StateStorage,
    inner: RwLock<CatalogSnapshot>,
}

impl CatalogStore {
    /// Wrap a loaded snapshot, reconciling like counters with the relation.
    pub fn new(state: StateStorage, mut snapshot: CatalogSnapshot) -> Self {
        let corrected = snapshot.reconcile_likes();
        if corrected > 0 {
            info!(corrected, "Reconciled like counters on load");
        }
        Self {
            state,
            inner: RwLock::new(snapshot),
        }
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Validate an upload and append it to the collection.
    pub fn add_entry(&self, upload: NewMapEntry) -> Result<MapEntry, CatalogError> {
        let upload = upload.normalized().map_err(CatalogError::Validation)?;
        let entry = MapEntry::from_upload(upload, time_utils::now_ms());

        self.mutate(|catalog| {
            catalog.maps.push(entry.clone());
            Ok(())
        })?;

        info!(map_id = %entry.id, name = %entry.name, user = %entry.uploaded_by, "Map uploaded");
        Ok(entry)
    }

    /// Like a map. Returns the entry's like count afterwards.
    pub fn like(&self, map_id: &str, user_id: &str) -> Result<u64, CatalogError> {
        self.mutate(|catalog| {
            let index = position(catalog, map_id)?;
            if catalog.likes.insert(user_id, map_id) {
                catalog.maps[index].likes += 1;
            }
            Ok(catalog.maps[index].likes)
        })
    }

    /// Remove a like. Returns the entry's like count afterwards.
    pub fn unlike(&self, map_id: &str, user_id: &str) -> Result<u64, CatalogError> {
        self.mutate(|catalog| {
            let index = position(catalog, map_id)?;
            if catalog.likes.remove(user_id, map_id) {
                let entry = &mut catalog.maps[index];
                entry.likes = entry.likes.saturating_sub(1);
            }
            Ok(catalog.maps[index].likes)
        })
    }

    pub fn save(&self, map_id: &str, user_id: &str) -> Result<(), CatalogError> {
        self.mutate(|catalog| {
            position(catalog, map_id)?;
            catalog.saves.insert(user_id, map_id);
            Ok(())
        })
    }

    pub fn unsave(&self, map_id: &str, user_id: &str) -> Result<(), CatalogError> {
        self.mutate(|catalog| {
            position(catalog, map_id)?;
            catalog.saves.remove(user_id, map_id);
            Ok(())
        })
    }

    /// Append a comment to a map entry.
    pub fn add_comment(
        &self,
        map_id: &str,
        user_id: &str,
        username: &str,
        content: &str,
    ) -> Result<Comment, CatalogError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(CatalogError::Validation(vec![ValidationError::required(
                "content",
            )]));
        }
        let comment = Comment::new(user_id, username, content, time_utils::now_ms());

        self.mutate(|catalog| {
            let index = position(catalog, map_id)?;
            catalog.maps[index].comments.push(comment.clone());
            Ok(())
        })?;

        info!(map_id, user = username, "Comment added");
        Ok(comment)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// The whole collection in stored order.
    pub fn list(&self) -> Vec<MapEntry> {
        self.inner.read().maps.clone()
    }

    pub fn get(&self, map_id: &str) -> Option<MapEntry> {
        self.inner
            .read()
            .maps
            .iter()
            .find(|entry| entry.id == map_id)
            .cloned()
    }

    /// Case-insensitive substring search over name, description and tags.
    pub fn search(&self, query: &str) -> Vec<MapEntry> {
        let needle = fold_case(query);
        self.collect(|entry| entry.matches_query(&needle))
    }

    /// A sorted copy of the collection. Stored order is not changed.
    pub fn sort(&self, criterion: SortCriterion) -> Vec<MapEntry> {
        let mut entries = self.list();
        criterion.sort(&mut entries);
        entries
    }

    /// Entries carrying every given tag. An empty list matches everything.
    pub fn filter_by_tags(&self, tags: &[String]) -> Vec<MapEntry> {
        self.collect(|entry| entry.has_all_tags(tags))
    }

    /// Filter by tags, then sort.
    pub fn browse(&self, tags: &[String], criterion: SortCriterion) -> Vec<MapEntry> {
        let mut entries = self.filter_by_tags(tags);
        criterion.sort(&mut entries);
        entries
    }

    /// Distinct tags across the collection, in first-appearance order.
    pub fn all_tags(&self) -> Vec<String> {
        let catalog = self.inner.read();
        let mut tags: Vec<String> = Vec::new();
        for tag in catalog.maps.iter().flat_map(|entry| entry.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }

    pub fn by_uploader(&self, username: &str) -> Vec<MapEntry> {
        self.collect(|entry| entry.uploaded_by == username)
    }

    /// Entries the user has liked, in collection order.
    pub fn get_liked(&self, user_id: &str) -> Vec<MapEntry> {
        let catalog = self.inner.read();
        catalog
            .maps
            .iter()
            .filter(|entry| catalog.likes.contains(user_id, &entry.id))
            .cloned()
            .collect()
    }

    /// Entries the user has saved, in collection order.
    pub fn get_saved(&self, user_id: &str) -> Vec<MapEntry> {
        let catalog = self.inner.read();
        catalog
            .maps
            .iter()
            .filter(|entry| catalog.saves.contains(user_id, &entry.id))
            .cloned()
            .collect()
    }

    pub fn has_liked(&self, map_id: &str, user_id: &str) -> bool {
        self.inner.read().likes.contains(user_id, map_id)
    }

    pub fn has_saved(&self, map_id: &str, user_id: &str) -> bool {
        self.inner.read().saves.contains(user_id, map_id)
    }

    /// A user's profile as seen by `viewer`.
    pub fn profile(&self, username: &str, viewer: Option<&Identity>) -> ProfileView {
        let own = viewer.filter(|identity| identity.username == username);
        ProfileView {
            username: username.to_string(),
            is_own_profile: own.is_some(),
            uploaded: self.by_uploader(username),
            liked: own.map(|i| self.get_liked(&i.id)).unwrap_or_default(),
            saved: own.map(|i| self.get_saved(&i.id)).unwrap_or_default(),
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn collect(&self, predicate: impl Fn(&MapEntry) -> bool) -> Vec<MapEntry> {
        self.inner
            .read()
            .maps
            .iter()
            .filter(|entry| predicate(entry))
            .cloned()
            .collect()
    }

    /// Apply `apply` to a working copy, persist it, then publish it.
    fn mutate<R>(
        &self,
        apply: impl FnOnce(&mut CatalogSnapshot) -> Result<R, CatalogError>,
    ) -> Result<R, CatalogError> {
        let mut guard = self.inner.write();
        let mut next = guard.clone();
        let result = apply(&mut next)?;
        self.state.save_catalog(&next)?;
        debug!(maps = next.maps.len(), "Catalog snapshot written");
        *guard = next;
        Ok(result)
    }
}

fn position(catalog: &CatalogSnapshot, map_id: &str) -> Result<usize, CatalogError> {
    catalog
        .maps
        .iter()
        .position(|entry| entry.id == map_id)
        .ok_or_else(|| CatalogError::MapNotFound(map_id.to_string()))
}

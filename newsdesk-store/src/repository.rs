//! The authoritative local collection of content items.

use crate::error::{StoreError, StoreResult};
use crate::seed::seed_items;
use crate::state_store::StateStore;
use chrono::Utc;
use newsdesk_types::{ContentItem, ContentPatch, LocalId, NewContent, RemoteId};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Well-known key the serialized item set lives under.
const CONTENT_KEY: &str = "newsdesk.content.items";

/// Allocates the next local id for the given item set: one past the
/// highest existing id, or a millisecond timestamp when the set is
/// empty so ids stay unique even after a full wipe.
#[must_use]
pub fn next_local_id(items: &[ContentItem]) -> LocalId {
    items
        .iter()
        .map(|i| i.local_id.as_i64())
        .max()
        .map_or_else(|| LocalId::new(Utc::now().timestamp_millis()), |max| LocalId::new(max + 1))
}

/// In-memory item set with wholesale persistence.
///
/// Every successful mutation re-serializes the entire collection to
/// the state store under one key. Mutations are read-modify-write on
/// a scratch copy, so a persistence failure leaves the in-memory set
/// exactly as it was.
pub struct ContentRepository {
    store: Arc<dyn StateStore>,
    items: Mutex<Vec<ContentItem>>,
}

impl ContentRepository {
    /// Loads the repository from the state store.
    ///
    /// Never fails: unreadable or structurally invalid stored data is
    /// replaced by the seed dataset, and valid stored data is topped
    /// up with any seed items it is missing (stored items win where
    /// both carry the same id).
    #[must_use]
    pub fn load(store: Arc<dyn StateStore>) -> Self {
        let items = match Self::read_stored(store.as_ref()) {
            Ok(Some(stored)) => {
                debug!(count = stored.len(), "loaded stored content");
                merge_with_seed(stored)
            }
            Ok(None) => {
                debug!("no stored content, starting from seed data");
                seed_items()
            }
            Err(e) => {
                warn!("stored content unusable, falling back to seed data: {e}");
                seed_items()
            }
        };
        Self {
            store,
            items: Mutex::new(items),
        }
    }

    /// Reads and validates the stored item set.
    ///
    /// Validation is structural, not a full schema check: the payload
    /// must be an array whose elements are objects carrying a numeric
    /// `local_id` and a string `title`. Everything else is left to
    /// deserialization defaults.
    fn read_stored(store: &dyn StateStore) -> StoreResult<Option<Vec<ContentItem>>> {
        let Some(raw) = store.read(CONTENT_KEY)? else {
            return Ok(None);
        };
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        let Some(entries) = value.as_array() else {
            return Err(StoreError::InvalidData("payload is not an array".into()));
        };
        for entry in entries {
            let Some(obj) = entry.as_object() else {
                return Err(StoreError::InvalidData("element is not an object".into()));
            };
            if !obj.get("local_id").is_some_and(serde_json::Value::is_i64) {
                return Err(StoreError::InvalidData("element has no numeric local_id".into()));
            }
            if !obj.get("title").is_some_and(serde_json::Value::is_string) {
                return Err(StoreError::InvalidData("element has no string title".into()));
            }
        }
        let items: Vec<ContentItem> = serde_json::from_value(value)?;
        check_invariants(&items)?;
        Ok(Some(items))
    }

    /// Returns every item, in stored order.
    #[must_use]
    pub fn list(&self) -> Vec<ContentItem> {
        self.items.lock().unwrap().clone()
    }

    /// Returns the item with the given local id, if any.
    #[must_use]
    pub fn get(&self, id: LocalId) -> Option<ContentItem> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.local_id == id)
            .cloned()
    }

    /// Number of items currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// True when no items are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }

    /// Creates a new item from the given fields, allocates its id,
    /// and persists the grown set.
    pub fn create(&self, new: NewContent) -> StoreResult<ContentItem> {
        let mut items = self.items.lock().unwrap();
        let mut next = items.clone();
        let item = ContentItem::from_new(next_local_id(&next), new);
        next.push(item.clone());
        self.persist(&next)?;
        *items = next;
        Ok(item)
    }

    /// Merges a patch into an existing item, bumps its modification
    /// time, and persists. Linking an already-claimed remote id is
    /// rejected before anything changes.
    pub fn update(&self, id: LocalId, patch: ContentPatch) -> StoreResult<ContentItem> {
        let mut items = self.items.lock().unwrap();
        if let Some(Some(remote_id)) = patch.remote_id {
            if let Some(holder) = items
                .iter()
                .find(|i| i.remote_id == Some(remote_id) && i.local_id != id)
            {
                return Err(StoreError::RemoteIdConflict {
                    remote_id,
                    held_by: holder.local_id,
                });
            }
        }
        let mut next = items.clone();
        let item = next
            .iter_mut()
            .find(|i| i.local_id == id)
            .ok_or(StoreError::NotFound(id))?;
        item.apply(patch);
        item.touch();
        let updated = item.clone();
        self.persist(&next)?;
        *items = next;
        Ok(updated)
    }

    /// Sets an item's remote link, leaving `modified_at` alone.
    /// Linking records where the item lives remotely; the content
    /// itself did not change, so the conflict clock must not move.
    pub fn link_remote(&self, id: LocalId, remote_id: RemoteId) -> StoreResult<ContentItem> {
        let mut items = self.items.lock().unwrap();
        if let Some(holder) = items
            .iter()
            .find(|i| i.remote_id == Some(remote_id) && i.local_id != id)
        {
            return Err(StoreError::RemoteIdConflict {
                remote_id,
                held_by: holder.local_id,
            });
        }
        let mut next = items.clone();
        let item = next
            .iter_mut()
            .find(|i| i.local_id == id)
            .ok_or(StoreError::NotFound(id))?;
        item.remote_id = Some(remote_id);
        let linked = item.clone();
        self.persist(&next)?;
        *items = next;
        Ok(linked)
    }

    /// Removes an item and persists the shrunken set. Returns the
    /// removed item so the caller can see whether it was linked;
    /// `None` when the id is unknown.
    pub fn delete(&self, id: LocalId) -> StoreResult<Option<ContentItem>> {
        let mut items = self.items.lock().unwrap();
        let Some(pos) = items.iter().position(|i| i.local_id == id) else {
            return Ok(None);
        };
        let mut next = items.clone();
        let removed = next.remove(pos);
        self.persist(&next)?;
        *items = next;
        Ok(Some(removed))
    }

    /// Replaces the whole item set in one persist. This is the pull
    /// merge commit path: one write no matter how many items changed.
    pub fn replace_all(&self, new_items: Vec<ContentItem>) -> StoreResult<()> {
        check_invariants(&new_items)?;
        let mut items = self.items.lock().unwrap();
        self.persist(&new_items)?;
        *items = new_items;
        Ok(())
    }

    fn persist(&self, items: &[ContentItem]) -> StoreResult<()> {
        let json = serde_json::to_string(items)?;
        self.store.write(CONTENT_KEY, &json)
    }
}

/// Rejects item sets that would break repository invariants: local
/// ids must be unique, and no remote id may be claimed twice.
fn check_invariants(items: &[ContentItem]) -> StoreResult<()> {
    for (idx, item) in items.iter().enumerate() {
        for other in &items[idx + 1..] {
            if other.local_id == item.local_id {
                return Err(StoreError::DuplicateLocalId(item.local_id));
            }
            if let (Some(a), Some(b)) = (item.remote_id, other.remote_id) {
                if a == b {
                    return Err(StoreError::RemoteIdConflict {
                        remote_id: a,
                        held_by: item.local_id,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Stored items plus any seed items the stored set is missing. Seed
/// content reappearing after a partial wipe beats silently losing it.
fn merge_with_seed(stored: Vec<ContentItem>) -> Vec<ContentItem> {
    let mut items = stored;
    for seed in seed_items() {
        if !items.iter().any(|i| i.local_id == seed.local_id) {
            items.push(seed);
        }
    }
    items
}

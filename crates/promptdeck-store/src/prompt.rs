//! Prompt store: owns the prompt collection, its id counter, and the
//! search/filter/sort views over it.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use promptdeck_storage::Storage;

use crate::error::StoreError;
use crate::types::{Prompt, PromptDraft};

/// Persisted key holding the prompt collection as a JSON array.
pub const PROMPTS_KEY: &str = "prompts";
/// Persisted key holding the next prompt id as a decimal string.
pub const NEXT_PROMPT_ID_KEY: &str = "nextPromptId";

/// Default number of entries returned by recent listings.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Owns the set of prompts and is the sole writer of its persisted keys.
///
/// The id sequence is independent from the category store's. Category
/// references are carried but never validated.
pub struct PromptStore {
    storage: Arc<dyn Storage>,
    prompts: Vec<Prompt>,
    next_id: u64,
}

impl std::fmt::Debug for PromptStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptStore")
            .field("prompts", &self.prompts)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl PromptStore {
    /// Load the persisted collection and counter; empty when nothing is
    /// persisted yet.
    pub fn open(storage: Arc<dyn Storage>) -> Result<Self, StoreError> {
        let prompts: Vec<Prompt> = match storage.get(PROMPTS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
                key: PROMPTS_KEY,
                source,
            })?,
            None => Vec::new(),
        };

        let next_id = match storage.get(NEXT_PROMPT_ID_KEY)? {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|source| StoreError::DecodeCounter {
                    key: NEXT_PROMPT_ID_KEY,
                    source,
                })?,
            None => prompts.iter().map(|p| p.id).max().unwrap_or(0) + 1,
        };

        Ok(Self {
            storage,
            prompts,
            next_id,
        })
    }

    fn persist(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.prompts).map_err(|source| StoreError::Encode {
            key: PROMPTS_KEY,
            source,
        })?;
        self.storage.set(PROMPTS_KEY, &raw)?;
        self.storage
            .set(NEXT_PROMPT_ID_KEY, &self.next_id.to_string())?;
        Ok(())
    }

    /// All prompts in insertion order.
    pub fn all(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Linear lookup by id.
    pub fn get(&self, id: u64) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    /// Create a prompt with the next id. Timestamps are stamped here;
    /// favorite and usage count start zeroed.
    pub fn add(&mut self, draft: PromptDraft) -> Result<Prompt, StoreError> {
        let now = Utc::now();
        let prompt = Prompt {
            id: self.next_id,
            title: draft.title,
            content: draft.content,
            category_id: draft.category_id,
            tags: draft.tags,
            examples: draft.examples,
            is_favorite: false,
            usage_count: 0,
            created_at: now,
            updated_at: now,
        };

        self.prompts.push(prompt.clone());
        self.next_id += 1;
        self.persist()?;

        Ok(prompt)
    }

    /// Replace the content fields of an existing prompt and refresh
    /// `updated_at`. The id, `created_at`, favorite flag and usage count are
    /// preserved.
    ///
    /// Returns `Ok(None)` when the id is absent, leaving the collection
    /// untouched.
    pub fn update(&mut self, id: u64, draft: PromptDraft) -> Result<Option<Prompt>, StoreError> {
        let Some(index) = self.prompts.iter().position(|p| p.id == id) else {
            return Ok(None);
        };

        {
            let prompt = &mut self.prompts[index];
            prompt.title = draft.title;
            prompt.content = draft.content;
            prompt.category_id = draft.category_id;
            prompt.tags = draft.tags;
            prompt.examples = draft.examples;
            prompt.updated_at = Utc::now();
        }
        self.persist()?;

        Ok(Some(self.prompts[index].clone()))
    }

    /// Remove a prompt, preserving the relative order of the rest.
    pub fn delete(&mut self, id: u64) -> Result<bool, StoreError> {
        let Some(index) = self.prompts.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        self.prompts.remove(index);
        self.persist()?;

        Ok(true)
    }

    /// Flip the favorite flag in place.
    ///
    /// Returns `Ok(None)` when the id is absent (nothing persisted),
    /// otherwise the new state.
    pub fn toggle_favorite(&mut self, id: u64) -> Result<Option<bool>, StoreError> {
        let Some(index) = self.prompts.iter().position(|p| p.id == id) else {
            return Ok(None);
        };

        self.prompts[index].is_favorite = !self.prompts[index].is_favorite;
        let state = self.prompts[index].is_favorite;
        self.persist()?;

        Ok(Some(state))
    }

    /// Increment the usage counter in place.
    ///
    /// Returns `Ok(None)` when the id is absent (nothing persisted),
    /// otherwise the new count.
    pub fn increment_usage(&mut self, id: u64) -> Result<Option<u64>, StoreError> {
        let Some(index) = self.prompts.iter().position(|p| p.id == id) else {
            return Ok(None);
        };

        self.prompts[index].usage_count += 1;
        let count = self.prompts[index].usage_count;
        self.persist()?;

        Ok(Some(count))
    }

    /// Prompts with an exact `category_id` match, in collection order.
    pub fn by_category(&self, category_id: u64) -> Vec<&Prompt> {
        self.prompts
            .iter()
            .filter(|p| p.category_id == category_id)
            .collect()
    }

    /// Favorited prompts, derived on access, in collection order.
    pub fn favorites(&self) -> Vec<&Prompt> {
        self.prompts.iter().filter(|p| p.is_favorite).collect()
    }

    /// The most recently created prompts, newest first, truncated to `limit`.
    ///
    /// The sort is stable, so prompts sharing a creation timestamp keep
    /// their insertion order. The underlying collection is not reordered.
    pub fn recent(&self, limit: usize) -> Vec<&Prompt> {
        let mut sorted: Vec<&Prompt> = self.prompts.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted.truncate(limit);
        sorted
    }

    /// Case-insensitive substring search over title, content and tags.
    ///
    /// An empty query returns the full collection.
    pub fn search(&self, query: &str) -> Vec<&Prompt> {
        if query.is_empty() {
            return self.prompts.iter().collect();
        }

        let query = query.to_lowercase();
        self.prompts
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&query)
                    || p.content.to_lowercase().contains(&query)
                    || p.tags.iter().any(|t| t.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// Merge imported prompts, appending records whose id is not already
    /// present. Colliding ids are silently dropped per-record.
    ///
    /// Advances the counter past the maximum id seen and persists only when
    /// at least one record was added. Returns the number added.
    pub fn import_many(&mut self, imported: Vec<Prompt>) -> Result<usize, StoreError> {
        let mut seen: HashSet<u64> = self.prompts.iter().map(|p| p.id).collect();
        let mut max_id = 0;
        let mut added = 0;

        for prompt in imported {
            if !seen.insert(prompt.id) {
                tracing::debug!(id = prompt.id, "skipping imported prompt: id exists");
                continue;
            }
            max_id = max_id.max(prompt.id);
            self.prompts.push(prompt);
            added += 1;
        }

        if added > 0 {
            self.next_id = self.next_id.max(max_id + 1);
            self.persist()?;
        }

        Ok(added)
    }

    /// Empty the collection and reset the counter to 1.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.prompts.clear();
        self.next_id = 1;
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptdeck_storage::MemoryStorage;

    fn store() -> PromptStore {
        PromptStore::open(Arc::new(MemoryStorage::new())).unwrap()
    }

    fn draft(title: &str, content: &str) -> PromptDraft {
        PromptDraft {
            title: title.to_string(),
            content: content.to_string(),
            category_id: 1,
            ..Default::default()
        }
    }

    /// Build an importable record with a fixed creation timestamp.
    fn record(id: u64, title: &str, created_at: &str) -> Prompt {
        Prompt {
            id,
            title: title.to_string(),
            content: String::new(),
            category_id: 1,
            tags: Vec::new(),
            examples: Vec::new(),
            is_favorite: false,
            usage_count: 0,
            created_at: created_at.parse().unwrap(),
            updated_at: created_at.parse().unwrap(),
        }
    }

    #[test]
    fn test_add_stamps_defaults() {
        let mut store = store();

        let prompt = store.add(draft("A", "x")).unwrap();

        assert_eq!(prompt.id, 1);
        assert!(!prompt.is_favorite);
        assert_eq!(prompt.usage_count, 0);
        assert_eq!(prompt.created_at, prompt.updated_at);

        let second = store.add(draft("B", "y")).unwrap();
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_deleted_ids_are_never_reused() {
        let mut store = store();

        store.add(draft("A", "x")).unwrap();
        store.add(draft("B", "y")).unwrap();

        assert!(store.delete(1).unwrap());
        let ids: Vec<u64> = store.all().iter().map(|p| p.id).collect();
        assert_eq!(ids, [2]);

        let third = store.add(draft("C", "z")).unwrap();
        assert_eq!(third.id, 3);
    }

    #[test]
    fn test_update_preserves_identity_fields() {
        let mut store = store();

        let original = store.add(draft("A", "x")).unwrap();
        store.toggle_favorite(original.id).unwrap();
        store.increment_usage(original.id).unwrap();

        let mut edit = draft("A2", "x2");
        edit.tags = vec!["rewritten".to_string()];
        let updated = store.update(original.id, edit).unwrap().unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.title, "A2");
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
        assert!(updated.is_favorite);
        assert_eq!(updated.usage_count, 1);
    }

    #[test]
    fn test_update_missing_returns_none() {
        let mut store = store();
        store.add(draft("A", "x")).unwrap();
        let before = store.all().to_vec();

        assert!(store.update(42, draft("B", "y")).unwrap().is_none());
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn test_toggle_favorite_round_trips() {
        let mut store = store();
        let prompt = store.add(draft("A", "x")).unwrap();

        assert_eq!(store.toggle_favorite(prompt.id).unwrap(), Some(true));
        assert_eq!(store.toggle_favorite(prompt.id).unwrap(), Some(false));
        assert_eq!(store.toggle_favorite(999).unwrap(), None);

        let after = store.get(prompt.id).unwrap();
        assert_eq!(after.title, "A");
        assert_eq!(after.usage_count, 0);
    }

    #[test]
    fn test_increment_usage_distinguishes_missing_from_zero() {
        let mut store = store();
        let prompt = store.add(draft("A", "x")).unwrap();

        assert_eq!(store.increment_usage(prompt.id).unwrap(), Some(1));
        assert_eq!(store.increment_usage(prompt.id).unwrap(), Some(2));
        assert_eq!(store.increment_usage(999).unwrap(), None);
    }

    #[test]
    fn test_by_category() {
        let mut store = store();
        store.add(draft("A", "x")).unwrap();
        let mut other = draft("B", "y");
        other.category_id = 2;
        store.add(other).unwrap();

        let matched = store.by_category(2);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "B");
        assert!(store.by_category(99).is_empty());
    }

    #[test]
    fn test_favorites_in_collection_order() {
        let mut store = store();
        let a = store.add(draft("A", "x")).unwrap();
        store.add(draft("B", "y")).unwrap();
        let c = store.add(draft("C", "z")).unwrap();

        store.toggle_favorite(c.id).unwrap();
        store.toggle_favorite(a.id).unwrap();

        let favorites: Vec<u64> = store.favorites().iter().map(|p| p.id).collect();
        assert_eq!(favorites, [a.id, c.id]);
    }

    #[test]
    fn test_recent_sorts_newest_first() {
        let mut store = store();
        store
            .import_many(vec![
                record(1, "old", "2026-01-01T00:00:00Z"),
                record(2, "new", "2026-03-01T00:00:00Z"),
                record(3, "mid", "2026-02-01T00:00:00Z"),
            ])
            .unwrap();

        let titles: Vec<&str> = store.recent(2).iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["new", "mid"]);

        // Collection order is untouched
        let ids: Vec<u64> = store.all().iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn test_recent_ties_keep_insertion_order() {
        let mut store = store();
        store
            .import_many(vec![
                record(1, "first", "2026-01-01T00:00:00Z"),
                record(2, "second", "2026-01-01T00:00:00Z"),
            ])
            .unwrap();

        let titles: Vec<&str> = store.recent(5).iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
    }

    #[test]
    fn test_search_matches_title_content_and_tags() {
        let mut store = store();
        store.add(draft("Email rewrite", "make it shorter")).unwrap();
        let mut tagged = draft("Other", "nothing");
        tagged.tags = vec!["Emails".to_string()];
        store.add(tagged).unwrap();
        store.add(draft("Unrelated", "nope")).unwrap();

        // Case-insensitive over title and tags
        let matched: Vec<&str> = store.search("email").iter().map(|p| p.title.as_str()).collect();
        assert_eq!(matched, ["Email rewrite", "Other"]);

        // Content match
        assert_eq!(store.search("SHORTER").len(), 1);

        // Empty query returns everything
        assert_eq!(store.search("").len(), 3);
    }

    #[test]
    fn test_import_collision_is_per_record() {
        let mut store = store();
        store
            .import_many(vec![record(2, "existing", "2026-01-01T00:00:00Z")])
            .unwrap();

        let added = store
            .import_many(vec![
                record(2, "collides", "2026-01-02T00:00:00Z"),
                record(7, "lands", "2026-01-02T00:00:00Z"),
            ])
            .unwrap();

        assert_eq!(added, 1);
        assert_eq!(store.get(2).unwrap().title, "existing");
        assert_eq!(store.get(7).unwrap().title, "lands");
    }

    #[test]
    fn test_import_batch_duplicate_ids_keep_first() {
        let mut store = store();

        // Two records with the same id in one batch: only the first lands
        let added = store
            .import_many(vec![
                record(5, "first", "2026-01-01T00:00:00Z"),
                record(5, "second", "2026-01-01T00:00:00Z"),
            ])
            .unwrap();

        assert_eq!(added, 1);
        assert_eq!(store.get(5).unwrap().title, "first");
    }

    #[test]
    fn test_clear_all_resets_counter() {
        let mut store = store();
        store.add(draft("A", "x")).unwrap();
        store.clear_all().unwrap();

        assert!(store.all().is_empty());
        assert_eq!(store.add(draft("B", "y")).unwrap().id, 1);
    }
}

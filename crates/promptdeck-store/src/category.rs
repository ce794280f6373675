//! Category store: owns the category collection and its id counter.

use std::collections::HashSet;
use std::sync::Arc;

use promptdeck_storage::Storage;

use crate::error::StoreError;
use crate::types::{Category, CategoryDraft, DEFAULT_CATEGORY_COLOR};

/// Persisted key holding the category collection as a JSON array.
pub const CATEGORIES_KEY: &str = "categories";
/// Persisted key holding the next category id as a decimal string.
pub const NEXT_CATEGORY_ID_KEY: &str = "nextCategoryId";

/// Owns the set of categories and is the sole writer of its persisted keys.
///
/// Every successful mutation serializes the full collection back to storage
/// before returning (write-through). Deleting a category never touches
/// prompts that reference it.
pub struct CategoryStore {
    storage: Arc<dyn Storage>,
    categories: Vec<Category>,
    next_id: u64,
}

impl CategoryStore {
    /// Load the persisted collection and counter.
    ///
    /// When nothing is persisted yet, seeds the four built-in categories
    /// (ids 1-4) and sets the counter to 5.
    pub fn open(storage: Arc<dyn Storage>) -> Result<Self, StoreError> {
        let (categories, derived_next) = match storage.get(CATEGORIES_KEY)? {
            Some(raw) => {
                let categories: Vec<Category> =
                    serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
                        key: CATEGORIES_KEY,
                        source,
                    })?;
                let max_id = categories.iter().map(|c| c.id).max().unwrap_or(0);
                (categories, max_id + 1)
            }
            None => (Self::builtin_categories(), 5),
        };

        let next_id = match storage.get(NEXT_CATEGORY_ID_KEY)? {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|source| StoreError::DecodeCounter {
                    key: NEXT_CATEGORY_ID_KEY,
                    source,
                })?,
            None => derived_next,
        };

        Ok(Self {
            storage,
            categories,
            next_id,
        })
    }

    fn builtin_categories() -> Vec<Category> {
        [
            (1, "General", DEFAULT_CATEGORY_COLOR),
            (2, "Creative Writing", "#2ecc71"),
            (3, "Coding", "#9b59b6"),
            (4, "Academic", "#f39c12"),
        ]
        .into_iter()
        .map(|(id, name, color)| Category {
            id,
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.categories).map_err(|source| StoreError::Encode {
            key: CATEGORIES_KEY,
            source,
        })?;
        self.storage.set(CATEGORIES_KEY, &raw)?;
        self.storage
            .set(NEXT_CATEGORY_ID_KEY, &self.next_id.to_string())?;
        Ok(())
    }

    /// All categories in insertion order.
    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    /// Linear lookup by id.
    pub fn get(&self, id: u64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Create a category with the next id, defaulting the color if absent.
    pub fn add(&mut self, draft: CategoryDraft) -> Result<Category, StoreError> {
        let category = Category {
            id: self.next_id,
            name: draft.name,
            color: draft
                .color
                .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
        };

        self.categories.push(category.clone());
        self.next_id += 1;
        self.persist()?;

        Ok(category)
    }

    /// Replace name/color of an existing category; the id is immutable.
    ///
    /// Returns `Ok(None)` when the id is absent, leaving the collection
    /// untouched.
    pub fn update(&mut self, id: u64, draft: CategoryDraft) -> Result<Option<Category>, StoreError> {
        let Some(index) = self.categories.iter().position(|c| c.id == id) else {
            return Ok(None);
        };

        {
            let category = &mut self.categories[index];
            category.name = draft.name;
            if let Some(color) = draft.color {
                category.color = color;
            }
        }
        self.persist()?;

        Ok(Some(self.categories[index].clone()))
    }

    /// Remove a category, preserving the relative order of the rest.
    ///
    /// Returns `Ok(false)` when the id is absent. Prompts referencing the
    /// deleted category keep their dangling reference.
    pub fn delete(&mut self, id: u64) -> Result<bool, StoreError> {
        let Some(index) = self.categories.iter().position(|c| c.id == id) else {
            return Ok(false);
        };

        self.categories.remove(index);
        self.persist()?;

        Ok(true)
    }

    /// Merge imported categories, appending records whose id is not already
    /// present. Colliding ids are silently dropped per-record.
    ///
    /// Advances the counter past the maximum id seen and persists only when
    /// at least one record was added. Returns the number added.
    pub fn import_many(&mut self, imported: Vec<Category>) -> Result<usize, StoreError> {
        let mut seen: HashSet<u64> = self.categories.iter().map(|c| c.id).collect();
        let mut max_id = 0;
        let mut added = 0;

        for category in imported {
            if !seen.insert(category.id) {
                tracing::debug!(id = category.id, "skipping imported category: id exists");
                continue;
            }
            max_id = max_id.max(category.id);
            self.categories.push(category);
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
        self.categories.clear();
        self.next_id = 1;
        self.persist()
    }
}

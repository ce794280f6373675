//! Core stores for promptdeck.
//!
//! Three stores own the library's state, each the sole writer of its
//! persisted keys in a shared [`Storage`](promptdeck_storage::Storage)
//! backend:
//!
//! - [`PromptStore`] - prompts: CRUD, search, filters, favorites, usage
//! - [`CategoryStore`] - categories: CRUD and import
//! - [`SettingsStore`] - theme preference and derived dark-mode state
//!
//! [`Library`] bundles the three, constructed once at application start and
//! passed by reference to consumers. The [`routes`] module carries the view
//! navigation table.

mod category;
mod error;
mod prompt;
pub mod routes;
mod settings;
mod types;

pub use category::{CategoryStore, CATEGORIES_KEY, NEXT_CATEGORY_ID_KEY};
pub use error::StoreError;
pub use prompt::{PromptStore, DEFAULT_RECENT_LIMIT, NEXT_PROMPT_ID_KEY, PROMPTS_KEY};
pub use settings::{
    ColorSchemeSource, EnvSchemeSource, SettingsStore, COLOR_SCHEME_ENV, THEME_KEY,
};
pub use types::{
    Category, CategoryDraft, Prompt, PromptDraft, Theme, UnknownTheme, DEFAULT_CATEGORY_COLOR,
};

use std::sync::Arc;

use promptdeck_storage::Storage;

/// The three stores over one storage backend.
///
/// There are no cross-store transactions; a caller coordinating two stores
/// (say, deleting a category and the prompts referencing it) does so
/// externally.
pub struct Library {
    pub prompts: PromptStore,
    pub categories: CategoryStore,
    pub settings: SettingsStore,
}

impl Library {
    /// Open all three stores against one storage backend.
    pub fn open(
        storage: Arc<dyn Storage>,
        scheme: Box<dyn ColorSchemeSource>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            prompts: PromptStore::open(storage.clone())?,
            categories: CategoryStore::open(storage.clone())?,
            settings: SettingsStore::open(storage, scheme)?,
        })
    }
}

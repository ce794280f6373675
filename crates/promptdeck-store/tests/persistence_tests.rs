use std::sync::Arc;

use promptdeck_store::{
    CategoryDraft, CategoryStore, ColorSchemeSource, Library, PromptDraft, PromptStore,
    SettingsStore, Theme, CATEGORIES_KEY, NEXT_PROMPT_ID_KEY, PROMPTS_KEY,
};
use promptdeck_storage::{FileStorage, MemoryStorage, Storage};
use tempfile::TempDir;

struct LightScheme;

impl ColorSchemeSource for LightScheme {
    fn prefers_dark(&self) -> bool {
        false
    }
}

fn draft(title: &str, content: &str) -> PromptDraft {
    PromptDraft {
        title: title.to_string(),
        content: content.to_string(),
        category_id: 1,
        ..Default::default()
    }
}

// ============================================================
// Round-trip: persist then reload reproduces collection + counter
// ============================================================

#[test]
fn test_prompt_store_round_trips_through_storage() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

    {
        let mut store = PromptStore::open(storage.clone()).unwrap();
        let mut d = draft("A", "alpha");
        d.tags = vec!["greek".to_string()];
        d.examples = vec![serde_json::json!({"input": "x", "output": "y"})];
        store.add(d).unwrap();
        store.add(draft("B", "beta")).unwrap();
        store.toggle_favorite(2).unwrap();
        store.increment_usage(1).unwrap();
        store.delete(1).unwrap();
    }

    let reopened = PromptStore::open(storage).unwrap();
    let ids: Vec<u64> = reopened.all().iter().map(|p| p.id).collect();
    assert_eq!(ids, [2]);
    assert!(reopened.get(2).unwrap().is_favorite);

    // The counter survives: id 1 is never reused
    let mut reopened = reopened;
    assert_eq!(reopened.add(draft("C", "gamma")).unwrap().id, 3);
}

#[test]
fn test_category_store_round_trips_through_files() {
    let dir = TempDir::new().unwrap();

    {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open_at(dir.path()).unwrap());
        let mut store = CategoryStore::open(storage).unwrap();
        store
            .add(CategoryDraft {
                name: "Email".to_string(),
                color: None,
            })
            .unwrap();
        store.delete(3).unwrap();
    }

    let storage: Arc<dyn Storage> = Arc::new(FileStorage::open_at(dir.path()).unwrap());
    let reopened = CategoryStore::open(storage).unwrap();
    let ids: Vec<u64> = reopened.all().iter().map(|c| c.id).collect();
    assert_eq!(ids, [1, 2, 4, 5]);
    assert_eq!(reopened.get(5).unwrap().name, "Email");
}

#[test]
fn test_theme_round_trips_through_files() {
    let dir = TempDir::new().unwrap();

    {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open_at(dir.path()).unwrap());
        let mut settings = SettingsStore::open(storage, Box::new(LightScheme)).unwrap();
        settings.set_theme(Theme::Dark).unwrap();
    }

    let storage: Arc<dyn Storage> = Arc::new(FileStorage::open_at(dir.path()).unwrap());
    let settings = SettingsStore::open(storage, Box::new(LightScheme)).unwrap();
    assert_eq!(settings.theme(), Theme::Dark);
    assert!(settings.is_dark_mode());
}

// ============================================================
// Persisted wire shape
// ============================================================

#[test]
fn test_persisted_records_use_camel_case_keys() {
    let storage = Arc::new(MemoryStorage::new());
    let mut store = PromptStore::open(storage.clone()).unwrap();
    store.add(draft("A", "x")).unwrap();

    let raw = storage.get(PROMPTS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &value.as_array().unwrap()[0];

    for key in [
        "id",
        "title",
        "content",
        "categoryId",
        "tags",
        "examples",
        "isFavorite",
        "usageCount",
        "createdAt",
        "updatedAt",
    ] {
        assert!(record.get(key).is_some(), "missing key {key}");
    }

    // Timestamps persist as ISO-8601 strings
    assert!(record["createdAt"].as_str().unwrap().contains('T'));

    // The counter persists as a decimal string, not JSON
    assert_eq!(
        storage.get(NEXT_PROMPT_ID_KEY).unwrap().as_deref(),
        Some("2")
    );
}

#[test]
fn test_category_color_defaults_when_absent_in_persisted_data() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(CATEGORIES_KEY, r#"[{"id":1,"name":"Bare"}]"#)
        .unwrap();

    let store = CategoryStore::open(storage).unwrap();
    assert_eq!(store.get(1).unwrap().color, "#3498db");
}

// ============================================================
// Library-level scenarios
// ============================================================

#[test]
fn test_library_opens_all_stores_over_one_backend() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let mut library = Library::open(storage, Box::new(LightScheme)).unwrap();

    // Independent id sequences
    let prompt = library.prompts.add(draft("A", "x")).unwrap();
    assert_eq!(prompt.id, 1);
    let category = library
        .categories
        .add(CategoryDraft {
            name: "Email".to_string(),
            color: None,
        })
        .unwrap();
    assert_eq!(category.id, 5);

    // Deleting a category leaves referencing prompts dangling
    let mut d = draft("Dangles", "x");
    d.category_id = category.id;
    let dangling = library.prompts.add(d).unwrap();
    assert!(library.categories.delete(category.id).unwrap());
    assert_eq!(
        library.prompts.get(dangling.id).unwrap().category_id,
        category.id
    );
}

#[test]
fn test_corrupt_persisted_prompts_surface_as_decode_error() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    storage.set(PROMPTS_KEY, "not json").unwrap();

    let err = PromptStore::open(storage).unwrap_err();
    assert!(err.to_string().contains(PROMPTS_KEY));
}

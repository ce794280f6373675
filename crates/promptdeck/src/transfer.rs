//! Export and import of the library as a single JSON document.
//!
//! The document shape is `{"prompts": [...], "categories": [...]}`. Import is
//! forgiving: a missing or non-array list contributes nothing, and malformed
//! records are skipped with a warning. Id collisions are handled per-record
//! by the stores.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use promptdeck_store::{Category, Library, Prompt};

/// Counts of records actually merged by an import.
#[derive(Debug, PartialEq, Eq)]
pub struct ImportReport {
    pub prompts_added: usize,
    pub categories_added: usize,
}

/// Write the full library (prompts and categories) to a JSON file.
pub fn export_to_file(library: &Library, path: &Path) -> Result<()> {
    let doc = serde_json::json!({
        "prompts": library.prompts.all(),
        "categories": library.categories.all(),
    });

    let pretty = serde_json::to_string_pretty(&doc)?;
    std::fs::write(path, pretty).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Merge a previously exported JSON file into the library.
pub fn import_from_file(library: &mut Library, path: &Path) -> Result<ImportReport> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let doc: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let categories: Vec<Category> = parse_list(doc.get("categories"));
    let prompts: Vec<Prompt> = parse_list(doc.get("prompts"));

    let categories_added = library.categories.import_many(categories)?;
    let prompts_added = library.prompts.import_many(prompts)?;

    Ok(ImportReport {
        prompts_added,
        categories_added,
    })
}

/// Decode a top-level list. Anything that is not an array yields nothing;
/// malformed records are dropped individually.
fn parse_list<T: DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("skipping malformed record in import: {e}");
                None
            }
        })
        .collect()
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Color applied to a category when none is given.
pub const DEFAULT_CATEGORY_COLOR: &str = "#3498db";

/// A named, colored grouping label attachable to prompts by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

/// Caller-supplied fields for creating or editing a category.
///
/// On add, a missing color falls back to [`DEFAULT_CATEGORY_COLOR`]; on
/// update, a missing color keeps the existing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// A stored reusable text prompt with its metadata.
///
/// `created_at` and `updated_at` are stamped by the store, never supplied by
/// callers; `examples` entries are opaque JSON values carried through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// References a `Category` id. Not validated: dangling references are
    /// possible and tolerated.
    pub category_id: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub examples: Vec<serde_json::Value>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub usage_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating or editing a prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category_id: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub examples: Vec<serde_json::Value>,
}

/// Theme preference. `System` defers to the environment's color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing a theme name that is not `system`, `light` or `dark`.
#[derive(Debug, thiserror::Error)]
#[error("unknown theme {0:?} (expected system, light or dark)")]
pub struct UnknownTheme(pub String);

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use promptdeck_store::Theme;

use super::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInfo {
    pub theme: Theme,
    pub is_dark_mode: bool,
    pub display_theme: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SetTheme {
    pub theme: Theme,
}

pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeInfo> {
    let mut library = state.library();
    // Re-check the environment's scheme so a System preference stays fresh
    library.settings.system_scheme_changed();
    Json(theme_info(&library))
}

pub async fn set_theme(
    State(state): State<AppState>,
    Json(body): Json<SetTheme>,
) -> Result<Json<ThemeInfo>, (StatusCode, String)> {
    let mut library = state.library();
    library
        .settings
        .set_theme(body.theme)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(theme_info(&library)))
}

fn theme_info(library: &promptdeck_store::Library) -> ThemeInfo {
    ThemeInfo {
        theme: library.settings.theme(),
        is_dark_mode: library.settings.is_dark_mode(),
        display_theme: library.settings.display_theme(),
    }
}

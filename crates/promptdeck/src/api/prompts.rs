use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use promptdeck_store::{Prompt, PromptDraft};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub category: Option<u64>,
    pub favorite: Option<bool>,
    pub recent: Option<usize>,
}

pub async fn list_prompts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Prompt>> {
    let library = state.library();

    let prompts: Vec<Prompt> = if let Some(limit) = params.recent {
        library.prompts.recent(limit).into_iter().cloned().collect()
    } else if params.favorite == Some(true) {
        library.prompts.favorites().into_iter().cloned().collect()
    } else if let Some(category) = params.category {
        library
            .prompts
            .by_category(category)
            .into_iter()
            .cloned()
            .collect()
    } else {
        library
            .prompts
            .search(params.q.as_deref().unwrap_or(""))
            .into_iter()
            .cloned()
            .collect()
    };

    Json(prompts)
}

pub async fn get_prompt(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Prompt>, (StatusCode, String)> {
    let library = state.library();
    library
        .prompts
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn create_prompt(
    State(state): State<AppState>,
    Json(draft): Json<PromptDraft>,
) -> Result<(StatusCode, Json<Prompt>), (StatusCode, String)> {
    let mut library = state.library();
    let prompt = library.prompts.add(draft).map_err(internal)?;
    Ok((StatusCode::CREATED, Json(prompt)))
}

pub async fn update_prompt(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(draft): Json<PromptDraft>,
) -> Result<Json<Prompt>, (StatusCode, String)> {
    let mut library = state.library();
    library
        .prompts
        .update(id, draft)
        .map_err(internal)?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn delete_prompt(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut library = state.library();
    if library.prompts.delete(id).map_err(internal)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let mut library = state.library();
    library
        .prompts
        .toggle_favorite(id)
        .map_err(internal)?
        .map(|is_favorite| Json(serde_json::json!({ "isFavorite": is_favorite })))
        .ok_or_else(|| not_found(id))
}

pub async fn use_prompt(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let mut library = state.library();
    library
        .prompts
        .increment_usage(id)
        .map_err(internal)?
        .map(|usage_count| Json(serde_json::json!({ "usageCount": usage_count })))
        .ok_or_else(|| not_found(id))
}

fn not_found(id: u64) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("prompt {} not found", id))
}

fn internal(e: promptdeck_store::StoreError) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

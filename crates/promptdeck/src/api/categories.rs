use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use promptdeck_store::{Category, CategoryDraft};

use super::AppState;

pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    let library = state.library();
    Json(library.categories.all().to_vec())
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(draft): Json<CategoryDraft>,
) -> Result<(StatusCode, Json<Category>), (StatusCode, String)> {
    let mut library = state.library();
    let category = library.categories.add(draft).map_err(internal)?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(draft): Json<CategoryDraft>,
) -> Result<Json<Category>, (StatusCode, String)> {
    let mut library = state.library();
    library
        .categories
        .update(id, draft)
        .map_err(internal)?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Deleting a category never cascades: prompts keep their reference.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut library = state.library();
    if library.categories.delete(id).map_err(internal)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn not_found(id: u64) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("category {} not found", id))
}

fn internal(e: promptdeck_store::StoreError) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

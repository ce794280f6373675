use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use promptdeck_store::routes::{self, RouteMatch, ViewRoute, NOT_FOUND, ROUTES};

/// The navigation table, for a front-end to consume.
pub async fn list_views() -> Json<Vec<ViewRoute>> {
    let mut all: Vec<ViewRoute> = ROUTES.to_vec();
    all.push(NOT_FOUND);
    Json(all)
}

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub path: String,
}

/// Resolve a view path to its route, title and bound prompt id.
pub async fn resolve_view(Query(params): Query<ResolveParams>) -> Json<RouteMatch> {
    Json(routes::resolve(&params.path))
}

/// Catch-all for unknown API paths.
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "view": NOT_FOUND.view,
            "title": NOT_FOUND.title,
        })),
    )
}

//! JSON HTTP API over the library, for view layers to consume.

mod categories;
mod prompts;
mod settings;
mod views;

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use axum::routing::{get, post, put};
use axum::Router;
use colored::Colorize;
use tower_http::cors::CorsLayer;

use promptdeck_store::Library;

/// Shared handler state. Store operations are synchronous read-modify-write
/// sequences; the mutex keeps them non-interleaved.
#[derive(Clone)]
pub struct AppState {
    library: Arc<Mutex<Library>>,
}

impl AppState {
    fn library(&self) -> MutexGuard<'_, Library> {
        self.library.lock().expect("library lock poisoned")
    }
}

pub fn create_router(library: Arc<Mutex<Library>>) -> Router {
    let state = AppState { library };

    Router::new()
        .route(
            "/api/prompts",
            get(prompts::list_prompts).post(prompts::create_prompt),
        )
        .route(
            "/api/prompts/{id}",
            get(prompts::get_prompt)
                .put(prompts::update_prompt)
                .delete(prompts::delete_prompt),
        )
        .route("/api/prompts/{id}/favorite", post(prompts::toggle_favorite))
        .route("/api/prompts/{id}/use", post(prompts::use_prompt))
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/categories/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route(
            "/api/settings/theme",
            get(settings::get_theme).put(settings::set_theme),
        )
        .route("/api/views", get(views::list_views))
        .route("/api/views/resolve", get(views::resolve_view))
        .fallback(views::not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API until interrupted.
pub async fn serve(library: Library, port: u16) -> Result<()> {
    let library = Arc::new(Mutex::new(library));
    let router = create_router(library);

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind API server to {}", addr))?;

    eprintln!();
    eprintln!(
        "  {} {}",
        "->".bright_green(),
        format!("API listening on http://{}", addr).bold()
    );
    eprintln!("  {} Press {} to stop", "->".dimmed(), "Ctrl+C".bold());
    eprintln!();

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

//! Route table

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_upload_bytes = state.settings.server.max_upload_bytes;

    Router::new()
        // Browser page
        .route("/", get(handlers::index))
        .route("/form", post(handlers::submit_form))
        .route("/reset", post(handlers::reset_page))
        .route("/images/:ordinal/download", get(handlers::download_image))
        .route("/health", get(handlers::health))
        // JSON API
        .route("/api/options", get(handlers::list_options))
        .route("/api/session", get(handlers::get_session))
        .route(
            "/api/session/image",
            put(handlers::upload_image).delete(handlers::clear_image),
        )
        .route("/api/session/description", put(handlers::set_description))
        .route("/api/session/model", put(handlers::set_model))
        .route("/api/session/vibe", put(handlers::set_vibe))
        .route("/api/generate", post(handlers::generate))
        .route("/api/reset", post(handlers::reset))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Router assembly.

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Map data
        .route(
            "/api/observations",
            get(handlers::observations::observations_handler),
        )
        .route("/api/viewport", get(handlers::viewport::viewport_handler))
        .route("/api/taxa/:taxon_id", get(handlers::taxa::taxon_handler))
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

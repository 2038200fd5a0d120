//! Initial viewport around the user.

use std::sync::Arc;

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::debug;

use crate::geolocation::locate;
use crate::state::AppState;
use crate::viewport::Viewport;

/// GET /api/viewport - 503 with `waiting_for_location` until a fix exists
pub async fn viewport_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match locate(state.position.as_ref(), state.geolocation_timeout).await {
        Ok(position) => Json(Viewport::around(position, state.viewport_size)).into_response(),
        Err(e) => {
            debug!(error = %e, "No position yet");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "waiting_for_location" })),
            )
                .into_response()
        }
    }
}

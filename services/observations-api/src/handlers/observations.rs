//! Markers for the visible map area.

use std::sync::Arc;

use axum::extract::{Extension, Query};
use axum::Json;
use serde::Deserialize;
use tracing::{debug, instrument};

use biodiv_common::{BiodivError, BoundingBox};

use crate::error::ApiError;
use crate::markers::MarkerCollection;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ObservationsQuery {
    /// `west,south,east,north`
    pub bbox: Option<String>,
}

/// GET /api/observations?bbox=west,south,east,north
#[instrument(skip(state))]
pub async fn observations_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ObservationsQuery>,
) -> Result<Json<MarkerCollection>, ApiError> {
    let raw = params
        .bbox
        .ok_or_else(|| BiodivError::MissingParameter("bbox".to_string()))?;
    let bbox = BoundingBox::from_query_string(&raw).map_err(BiodivError::from)?;

    let outcome = state.orchestrator.refresh_bbox(&bbox).await?;
    debug!(
        cells = outcome.cells,
        records = outcome.records.len(),
        degraded = outcome.degraded,
        "Viewport refreshed"
    );

    Ok(Json(MarkerCollection::from(&outcome)))
}

//! Details for a selected marker's taxon.

use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::Json;

use enrichment::TaxonDetails;

use crate::state::AppState;

/// GET /api/taxa/:taxon_id
pub async fn taxon_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(taxon_id): Path<i64>,
) -> Json<TaxonDetails> {
    Json(state.enrichment.lookup(taxon_id).await)
}

//! Concurrent refresh of the visible cells.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::join_all;
use metrics::{counter, gauge};
use serde::Serialize;
use tracing::{info, instrument, warn};

use biodiv_common::{BiodivResult, BoundingBox, CellCacheEntry, CellId, OccurrenceRecord};
use spatial_index::SpatialIndexer;

use crate::cell_store::CellCacheStore;
use crate::merge::union_records;

/// Above this many visible cells no network sync is attempted.
pub const DEFAULT_SYNC_THRESHOLD: usize = 10;

/// Viewports estimated above this many cells are not enumerated at all.
pub const MAX_COVER_CELLS: usize = 1_000_000;

/// Result of one refresh cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshOutcome {
    /// Union of all cells' records, one per id, ascending by id
    pub records: Vec<OccurrenceRecord>,
    /// One entry per cell that could not be refreshed
    pub warnings: Vec<String>,
    /// Some or all data came from the cache without a successful sync
    pub degraded: bool,
    /// Distinct cells considered
    pub cells: usize,
}

pub struct SyncOrchestrator {
    cells: Arc<CellCacheStore>,
    indexer: SpatialIndexer,
    threshold: usize,
}

impl SyncOrchestrator {
    pub fn new(cells: Arc<CellCacheStore>) -> Self {
        Self::with_threshold(cells, DEFAULT_SYNC_THRESHOLD)
    }

    pub fn with_threshold(cells: Arc<CellCacheStore>, threshold: usize) -> Self {
        Self {
            cells,
            indexer: SpatialIndexer::new(),
            threshold,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn cell_store(&self) -> &Arc<CellCacheStore> {
        &self.cells
    }

    /// Cover `bbox` with cells and refresh them.
    ///
    /// Only an invalid box is an error. A box too large to enumerate gets an
    /// empty degraded outcome without touching the network or the cache.
    pub async fn refresh_bbox(&self, bbox: &BoundingBox) -> BiodivResult<RefreshOutcome> {
        let estimate = self.indexer.cover_size_hint(bbox)?;
        if estimate > MAX_COVER_CELLS {
            info!(
                estimate,
                max = MAX_COVER_CELLS,
                "Viewport too large to cover, serving nothing"
            );
            counter!("biodiv_refresh_sync_skipped_total").increment(1);
            return Ok(RefreshOutcome {
                records: Vec::new(),
                warnings: vec![format!(
                    "Viewport spans about {} cells, zoom in to load observations",
                    estimate
                )],
                degraded: true,
                cells: 0,
            });
        }

        let cells = self.indexer.cover(bbox)?;
        Ok(self.refresh(cells).await)
    }

    /// Refresh `visible` cells and aggregate their records.
    ///
    /// Never fails as a whole: a cell whose sync fails contributes its last
    /// persisted records and one warning.
    #[instrument(skip(self, visible))]
    pub async fn refresh(&self, visible: impl IntoIterator<Item = CellId>) -> RefreshOutcome {
        let cells: BTreeSet<CellId> = visible.into_iter().collect();

        let outcome = if cells.len() > self.threshold {
            info!(
                cells = cells.len(),
                threshold = self.threshold,
                "Too many visible cells, serving cached data only"
            );
            counter!("biodiv_refresh_sync_skipped_total").increment(1);
            self.cached_only(&cells).await
        } else {
            self.sync_all(&cells).await
        };

        gauge!("biodiv_refresh_records").set(outcome.records.len() as f64);
        outcome
    }

    async fn sync_all(&self, cells: &BTreeSet<CellId>) -> RefreshOutcome {
        let results = join_all(cells.iter().map(|cell| async move {
            let result = self.cells.sync(cell).await;
            (cell, result)
        }))
        .await;

        let mut entries: Vec<CellCacheEntry> = Vec::with_capacity(results.len());
        let mut warnings = Vec::new();

        for (cell, result) in results {
            match result {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!(cell = %cell, error = %e, "Cell sync failed, using cached records");
                    counter!("biodiv_cell_sync_failures_total").increment(1);
                    warnings.push(format!("Cell {} could not be refreshed: {}", cell, e));

                    match self.cells.load(cell).await {
                        Ok(Some(entry)) => entries.push(entry),
                        Ok(None) => {}
                        Err(e) => warn!(cell = %cell, error = %e, "Cached records unavailable"),
                    }
                }
            }
        }

        let degraded = !warnings.is_empty();
        RefreshOutcome {
            records: union_records(entries.iter().map(|e| &e.records)),
            warnings,
            degraded,
            cells: cells.len(),
        }
    }

    async fn cached_only(&self, cells: &BTreeSet<CellId>) -> RefreshOutcome {
        let loaded = join_all(
            cells
                .iter()
                .map(|cell| async move { (cell, self.cells.load(cell).await) }),
        )
        .await;

        let mut entries = Vec::new();
        let mut warnings = Vec::new();
        for (cell, result) in loaded {
            match result {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(e) => {
                    warn!(cell = %cell, error = %e, "Cached records unavailable");
                    warnings.push(format!("Cell {} could not be read: {}", cell, e));
                }
            }
        }

        RefreshOutcome {
            records: union_records(entries.iter().map(|e| &e.records)),
            warnings,
            degraded: true,
            cells: cells.len(),
        }
    }
}

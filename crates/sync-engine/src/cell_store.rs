//! Per-cell freshness and merge engine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use metrics::counter;
use tracing::{debug, info, instrument, warn};

use biodiv_common::{BiodivResult, CellCacheEntry, CellId, Clock, DateRange};
use gbif_client::OccurrenceSearch;
use spatial_index::SpatialIndexer;
use storage::KeyValueStore;

use crate::merge::merge_records;

/// Tunables for one cell sync.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSettings {
    /// Largest coordinate uncertainty accepted from the remote source
    pub max_uncertainty_m: u32,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            max_uncertainty_m: 500,
        }
    }
}

/// A cell needs a sync when it has no entry or its watermark is before
/// `yesterday`.
pub fn needs_sync(entry: Option<&CellCacheEntry>, yesterday: NaiveDate) -> bool {
    match entry {
        None => true,
        Some(entry) => entry.last_synced_through < yesterday,
    }
}

type CellLocks = Mutex<HashMap<CellId, Arc<tokio::sync::Mutex<()>>>>;

/// Sole writer of cell cache entries.
pub struct CellCacheStore {
    store: Arc<dyn KeyValueStore>,
    source: Arc<dyn OccurrenceSearch>,
    indexer: SpatialIndexer,
    clock: Arc<dyn Clock>,
    settings: SyncSettings,
    locks: CellLocks,
}

impl CellCacheStore {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn OccurrenceSearch>,
        clock: Arc<dyn Clock>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            store,
            source,
            indexer: SpatialIndexer::new(),
            clock,
            settings,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Read the persisted entry for `cell`. A value that does not parse is
    /// treated as absent.
    pub async fn load(&self, cell: &CellId) -> BiodivResult<Option<CellCacheEntry>> {
        let key = cell.storage_key();
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<CellCacheEntry>(&raw) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                warn!(cell = %cell, error = %e, "Malformed cache entry, treating as miss");
                counter!("biodiv_malformed_cache_entries_total").increment(1);
                Ok(None)
            }
        }
    }

    /// Bring `cell` up to date through yesterday and return its entry.
    ///
    /// A fresh entry is returned without any network call. On remote failure
    /// nothing is persisted and the error is returned.
    #[instrument(skip(self), fields(cell = %cell))]
    pub async fn sync(&self, cell: &CellId) -> BiodivResult<CellCacheEntry> {
        let lock = self.lock_for(cell);
        let _guard = lock.mutex.lock().await;

        let yesterday = self.clock.yesterday();
        let existing = self.load(cell).await?;

        if !needs_sync(existing.as_ref(), yesterday) {
            debug!(cell = %cell, "Cell is fresh");
            counter!("biodiv_cell_sync_fresh_total").increment(1);
            return Ok(existing.unwrap_or_else(CellCacheEntry::empty));
        }

        let mut entry = existing.unwrap_or_else(CellCacheEntry::empty);
        let range = DateRange::new(entry.last_synced_through, yesterday);
        let polygon = self.indexer.cell_polygon(cell)?;

        let fetched = self
            .source
            .search(&polygon, range, self.settings.max_uncertainty_m)
            .await?;
        let fetched_count = fetched.len();

        let added = merge_records(&mut entry.records, fetched);
        entry.advance_watermark(yesterday);

        let json = serde_json::to_string(&entry)?;
        self.store.set(&cell.storage_key(), &json).await?;

        counter!("biodiv_cell_syncs_total").increment(1);
        info!(
            cell = %cell,
            fetched = fetched_count,
            added,
            total = entry.len(),
            through = %entry.last_synced_through,
            "Cell synced"
        );

        Ok(entry)
    }

    fn lock_for<'a>(&'a self, cell: &'a CellId) -> CellLock<'a> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        let mutex = Arc::clone(locks.entry(cell.clone()).or_default());
        CellLock {
            locks: &self.locks,
            cell,
            mutex,
        }
    }
}

/// Handle on one cell's sync mutex. The map entry goes away with the last handle.
struct CellLock<'a> {
    locks: &'a CellLocks,
    cell: &'a CellId,
    mutex: Arc<tokio::sync::Mutex<()>>,
}

impl Drop for CellLock<'_> {
    fn drop(&mut self) {
        // Handles are only cloned under the map lock, so two owners here means
        // the map and this handle.
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        if Arc::strong_count(&self.mutex) == 2 {
            locks.remove(self.cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use biodiv_common::{FixedClock, OccurrenceRecord};
    use futures::future::join_all;
    use spatial_index::CellPolygon;
    use storage::MemoryStore;
    use test_utils::fixtures::dates;
    use test_utils::occurrences;

    struct SlowSource;

    #[async_trait]
    impl OccurrenceSearch for SlowSource {
        async fn search(
            &self,
            _polygon: &CellPolygon,
            _range: DateRange,
            _max_uncertainty_m: u32,
        ) -> BiodivResult<Vec<OccurrenceRecord>> {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            Ok(occurrences(0..3))
        }
    }

    fn cell_store() -> CellCacheStore {
        CellCacheStore::new(
            Arc::new(MemoryStore::new()),
            Arc::new(SlowSource),
            Arc::new(FixedClock(dates::today())),
            SyncSettings::default(),
        )
    }

    fn lock_count(cells: &CellCacheStore) -> usize {
        cells.locks.lock().unwrap().len()
    }

    #[test]
    fn test_needs_sync_rules() {
        let yesterday = dates::yesterday();
        assert!(needs_sync(None, yesterday));

        let mut entry = CellCacheEntry::empty();
        assert!(needs_sync(Some(&entry), yesterday));

        entry.advance_watermark(yesterday);
        assert!(!needs_sync(Some(&entry), yesterday));

        entry.advance_watermark(dates::today());
        assert!(!needs_sync(Some(&entry), yesterday));
    }

    #[tokio::test]
    async fn test_lock_entry_released_after_sync() {
        let cells = cell_store();
        let cell = SpatialIndexer::new().cell_at(52.5163, 13.3777).unwrap();

        cells.sync(&cell).await.unwrap();
        assert_eq!(lock_count(&cells), 0);

        // fresh path returns early
        cells.sync(&cell).await.unwrap();
        assert_eq!(lock_count(&cells), 0);
    }

    #[tokio::test]
    async fn test_lock_entries_released_after_concurrent_syncs() {
        let cells = cell_store();
        let indexer = SpatialIndexer::new();
        let a = indexer.cell_at(52.5163, 13.3777).unwrap();
        let b = indexer.cell_at(48.8584, 2.2945).unwrap();
        let targets = [&a, &a, &a, &b, &b];

        let results = join_all(targets.iter().map(|cell| cells.sync(cell))).await;

        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(lock_count(&cells), 0);
    }
}

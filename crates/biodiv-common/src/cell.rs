//! Cell identifiers and the per-cell cache entry.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::OccurrenceRecord;
use crate::time::epoch;

/// Opaque identifier of one hexagonal map cell.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(String);

impl CellId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Persistent store key holding this cell's cache entry.
    pub fn storage_key(&self) -> String {
        format!("cell:{}", self.0)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CellId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Cached occurrence data for one cell.
///
/// `records` is keyed by record id so the no-duplicate-id invariant holds by
/// construction. `last_synced_through` only ever moves forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellCacheEntry {
    pub last_synced_through: NaiveDate,
    #[serde(with = "records_as_list")]
    pub records: BTreeMap<i64, OccurrenceRecord>,
}

impl CellCacheEntry {
    /// Entry for a cell that has never been synced.
    pub fn empty() -> Self {
        Self {
            last_synced_through: epoch(),
            records: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Advance the watermark. Earlier dates are ignored.
    pub fn advance_watermark(&mut self, through: NaiveDate) {
        if through > self.last_synced_through {
            self.last_synced_through = through;
        }
    }
}

impl Default for CellCacheEntry {
    fn default() -> Self {
        Self::empty()
    }
}

/// Records persist as a JSON array; duplicates in stored data collapse on load.
mod records_as_list {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use crate::record::OccurrenceRecord;

    pub fn serialize<S>(
        records: &BTreeMap<i64, OccurrenceRecord>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(records.values())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<i64, OccurrenceRecord>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = Vec::<OccurrenceRecord>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|r| (r.id, r)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> OccurrenceRecord {
        OccurrenceRecord {
            id,
            scientific_name: format!("Species {}", id),
            taxon_id: Some(id * 10),
            latitude: 0.0,
            longitude: 0.0,
            observed_at: None,
            basis_of_record: "HUMAN_OBSERVATION".to_string(),
            kingdom: "Animalia".to_string(),
        }
    }

    #[test]
    fn test_storage_key_is_direct() {
        let id = CellId::new("881f1d4891fffff");
        assert_eq!(id.storage_key(), "cell:881f1d4891fffff");
    }

    #[test]
    fn test_entry_json_roundtrip_collapses_duplicate_ids() {
        let json = serde_json::json!({
            "lastSyncedThrough": "2024-03-01",
            "records": [
                serde_json::to_value(record(1)).unwrap(),
                serde_json::to_value(record(1)).unwrap(),
                serde_json::to_value(record(2)).unwrap(),
            ]
        });

        let entry: CellCacheEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.len(), 2);
        assert_eq!(
            entry.last_synced_through,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_watermark_never_moves_back() {
        let mut entry = CellCacheEntry::empty();
        let d1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let d0 = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        entry.advance_watermark(d1);
        entry.advance_watermark(d0);
        assert_eq!(entry.last_synced_through, d1);
    }
}

//! Dedup-by-id merging.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use biodiv_common::OccurrenceRecord;

/// Merge `fetched` into `existing`, keyed by record id.
///
/// An id already present keeps its existing record. Returns how many ids were
/// new.
pub fn merge_records(
    existing: &mut BTreeMap<i64, OccurrenceRecord>,
    fetched: impl IntoIterator<Item = OccurrenceRecord>,
) -> usize {
    let mut added = 0;
    for record in fetched {
        if let Entry::Vacant(slot) = existing.entry(record.id) {
            slot.insert(record);
            added += 1;
        }
    }
    added
}

/// Union of several record maps, one record per id, ascending by id.
pub fn union_records<'a>(
    sets: impl IntoIterator<Item = &'a BTreeMap<i64, OccurrenceRecord>>,
) -> Vec<OccurrenceRecord> {
    let mut all = BTreeMap::new();
    for set in sets {
        merge_records(&mut all, set.values().cloned());
    }
    all.into_values().collect()
}

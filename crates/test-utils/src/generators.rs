//! Generators for synthetic occurrence data.
//!
//! Records are derived from their id alone, so two generated records with the
//! same id are always equal. That makes dedup checks straightforward.

use std::ops::Range;

use biodiv_common::OccurrenceRecord;
use chrono::NaiveDate;
use serde_json::{json, Value};

const KINGDOMS: [&str; 4] = ["Plantae", "Animalia", "Fungi", "Chromista"];

/// Creates one record whose fields are a pure function of `id`.
///
/// # Example
///
/// ```
/// use test_utils::occurrence;
///
/// assert_eq!(occurrence(7), occurrence(7));
/// assert_eq!(occurrence(7).taxon_id, Some(1007));
/// ```
pub fn occurrence(id: i64) -> OccurrenceRecord {
    OccurrenceRecord {
        id,
        scientific_name: format!("Testus specius{}", id),
        taxon_id: Some(1000 + id),
        latitude: 52.51 + (id % 100) as f64 * 0.0001,
        longitude: 13.37 + (id % 100) as f64 * 0.0001,
        observed_at: NaiveDate::from_ymd_opt(2024, 1 + (id % 12) as u32, 1),
        basis_of_record: "HUMAN_OBSERVATION".to_string(),
        kingdom: KINGDOMS[(id.rem_euclid(4)) as usize].to_string(),
    }
}

/// Creates one record per id in the range.
pub fn occurrences(ids: Range<i64>) -> Vec<OccurrenceRecord> {
    ids.map(occurrence).collect()
}

/// The upstream search JSON for a generated record.
pub fn gbif_occurrence_json(id: i64) -> Value {
    let record = occurrence(id);
    json!({
        "key": record.id,
        "scientificName": record.scientific_name,
        "taxonKey": record.taxon_id,
        "decimalLatitude": record.latitude,
        "decimalLongitude": record.longitude,
        "eventDate": record.observed_at.map(|d| format!("{}T09:30:00", d)),
        "basisOfRecord": record.basis_of_record,
        "kingdom": record.kingdom,
    })
}

/// One page of upstream search results.
pub fn gbif_page(ids: Range<i64>, offset: usize, limit: usize, count: usize) -> Value {
    let results: Vec<Value> = ids.map(gbif_occurrence_json).collect();
    let end_of_records = offset + results.len() >= count;
    json!({
        "offset": offset,
        "limit": limit,
        "endOfRecords": end_of_records,
        "count": count,
        "results": results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurrences_have_distinct_ids() {
        let records = occurrences(0..50);
        assert_eq!(records.len(), 50);
        assert!(records.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_gbif_page_end_of_records() {
        let page = gbif_page(600..647, 600, 300, 647);
        assert_eq!(page["results"].as_array().unwrap().len(), 47);
        assert_eq!(page["endOfRecords"], true);

        let page = gbif_page(0..300, 0, 300, 647);
        assert_eq!(page["endOfRecords"], false);
    }
}

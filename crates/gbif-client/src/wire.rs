//! Upstream JSON shapes.

use serde::Deserialize;

use biodiv_common::time::parse_event_date;
use biodiv_common::OccurrenceRecord;

/// Fields requested from the occurrence search.
pub const OCCURRENCE_FIELDS: &str =
    "key,scientificName,taxonKey,decimalLatitude,decimalLongitude,eventDate,basisOfRecord,kingdom";

/// One page of `/occurrence/search`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub end_of_records: bool,
    #[serde(default)]
    pub results: Vec<RawOccurrence>,
}

/// An occurrence as the API returns it. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOccurrence {
    pub key: Option<i64>,
    pub scientific_name: Option<String>,
    pub taxon_key: Option<i64>,
    pub decimal_latitude: Option<f64>,
    pub decimal_longitude: Option<f64>,
    pub event_date: Option<String>,
    pub basis_of_record: Option<String>,
    pub kingdom: Option<String>,
}

impl RawOccurrence {
    /// Convert to a record. Entries without a key or coordinates are dropped.
    pub fn into_record(self) -> Option<OccurrenceRecord> {
        let id = self.key?;
        let latitude = self.decimal_latitude?;
        let longitude = self.decimal_longitude?;

        Some(OccurrenceRecord {
            id,
            scientific_name: self.scientific_name.unwrap_or_default(),
            taxon_id: self.taxon_key,
            latitude,
            longitude,
            observed_at: self.event_date.as_deref().and_then(parse_event_date),
            basis_of_record: self.basis_of_record.unwrap_or_default(),
            kingdom: self.kingdom.unwrap_or_default(),
        })
    }
}

/// `/species/{id}` response; only the vernacular name is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesResponse {
    pub vernacular_name: Option<String>,
}

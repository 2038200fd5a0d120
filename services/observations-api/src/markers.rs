//! GeoJSON markers for the map.

use chrono::Datelike;
use serde::Serialize;

use biodiv_common::OccurrenceRecord;
use sync_engine::RefreshOutcome;

#[derive(Debug, Clone, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `[lng, lat]`
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerProperties {
    pub scientific_name: String,
    pub taxon_id: Option<i64>,
    pub kingdom: String,
    pub color: &'static str,
    pub basis_of_record: String,
    pub observed_date: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerFeature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub geometry: PointGeometry,
    pub properties: MarkerProperties,
}

impl From<&OccurrenceRecord> for MarkerFeature {
    fn from(record: &OccurrenceRecord) -> Self {
        Self {
            kind: "Feature",
            id: record.marker_key(),
            geometry: PointGeometry {
                kind: "Point",
                coordinates: [record.longitude, record.latitude],
            },
            properties: MarkerProperties {
                scientific_name: record.scientific_name.clone(),
                taxon_id: record.taxon_id,
                kingdom: record.kingdom.clone(),
                color: record.kingdom_class().color(),
                basis_of_record: record.basis_of_record.clone(),
                observed_date: record.observed_at.map(|d| d.format("%Y-%m-%d").to_string()),
                year: record.observed_at.map(|d| d.year()),
            },
        }
    }
}

/// Markers plus refresh status, one feature per record.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<MarkerFeature>,
    pub warnings: Vec<String>,
    pub degraded: bool,
    pub cells: usize,
}

impl From<&RefreshOutcome> for MarkerCollection {
    fn from(outcome: &RefreshOutcome) -> Self {
        Self {
            kind: "FeatureCollection",
            features: outcome.records.iter().map(MarkerFeature::from).collect(),
            warnings: outcome.warnings.clone(),
            degraded: outcome.degraded,
            cells: outcome.cells,
        }
    }
}

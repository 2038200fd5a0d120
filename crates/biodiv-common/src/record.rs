//! Occurrence records and their display classification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observation of an organism at a place and date.
///
/// Records are immutable facts keyed by the remote-assigned `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceRecord {
    /// Remote-assigned identifier, globally unique.
    pub id: i64,
    pub scientific_name: String,
    /// Taxon key used for name/media enrichment.
    pub taxon_id: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
    pub observed_at: Option<NaiveDate>,
    pub basis_of_record: String,
    pub kingdom: String,
}

impl OccurrenceRecord {
    /// Display category derived from the kingdom name.
    pub fn kingdom_class(&self) -> Kingdom {
        Kingdom::from_name(&self.kingdom)
    }

    /// Stable key for the map marker of this record.
    pub fn marker_key(&self) -> String {
        format!("marker-{}", self.id)
    }
}

/// Kingdoms that get a dedicated marker color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kingdom {
    Plantae,
    Animalia,
    Fungi,
    Other,
}

impl Kingdom {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Plantae" => Kingdom::Plantae,
            "Animalia" => Kingdom::Animalia,
            "Fungi" => Kingdom::Fungi,
            _ => Kingdom::Other,
        }
    }

    /// Marker color as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Kingdom::Plantae => "#228B22",
            Kingdom::Animalia => "#4682B4",
            Kingdom::Fungi => "#D2691E",
            Kingdom::Other => "#A9A9A9",
        }
    }
}

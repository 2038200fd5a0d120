//! Common test fixtures for sync and lookup tests.

/// Common bounding boxes as (west, south, east, north).
pub mod bbox {
    /// A city park, about 2 km by 1.2 km.
    pub const CITY_PARK: (f64, f64, f64, f64) = (13.3400, 52.5090, 13.3700, 52.5200);

    /// Phone screen at zoom 17, about 290 m by 580 m.
    pub const STREET_VIEWPORT: (f64, f64, f64, f64) = (13.3740, 52.5135, 13.3782, 52.5187);

    /// Zoomed out over a city district, covers well over ten cells.
    pub const DISTRICT: (f64, f64, f64, f64) = (13.3000, 52.4900, 13.4200, 52.5400);

    /// Single point (degenerate bbox)
    pub const SINGLE_POINT: (f64, f64, f64, f64) = (13.3777, 52.5163, 13.3777, 52.5163);
}

/// Fixed dates.
pub mod dates {
    use chrono::NaiveDate;

    /// "Today" for tests driven by a fixed clock.
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    pub fn yesterday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
    }
}

/// Upstream payloads.
pub mod payloads {
    use serde_json::{json, Value};

    /// A Wikidata SPARQL result with one image, one audio, one video binding.
    pub fn wikidata_media_bindings() -> Value {
        json!({
            "head": { "vars": ["item", "itemLabel", "image", "audio", "video"] },
            "results": {
                "bindings": [
                    {
                        "item": { "type": "uri", "value": "http://www.wikidata.org/entity/Q165145" },
                        "itemLabel": { "type": "literal", "value": "Quercus robur" },
                        "video": { "type": "uri", "value": "http://commons.wikimedia.org/wiki/Special:FilePath/Oak.webm" }
                    },
                    {
                        "item": { "type": "uri", "value": "http://www.wikidata.org/entity/Q165145" },
                        "itemLabel": { "type": "literal", "value": "Quercus robur" },
                        "image": { "type": "uri", "value": "http://commons.wikimedia.org/wiki/Special:FilePath/Oak1.jpg" }
                    },
                    {
                        "item": { "type": "uri", "value": "http://www.wikidata.org/entity/Q165145" },
                        "itemLabel": { "type": "literal", "value": "Quercus robur" },
                        "audio": { "type": "uri", "value": "https://commons.wikimedia.org/wiki/Special:FilePath/Oak.ogg" }
                    },
                    {
                        "item": { "type": "uri", "value": "http://www.wikidata.org/entity/Q165145" },
                        "itemLabel": { "type": "literal", "value": "Quercus robur" },
                        "image": { "type": "uri", "value": "http://commons.wikimedia.org/wiki/Special:FilePath/Oak2.jpg" }
                    }
                ]
            }
        })
    }

    /// A Wikidata SPARQL result with no bindings.
    pub fn wikidata_empty() -> Value {
        json!({
            "head": { "vars": ["item", "itemLabel", "image"] },
            "results": { "bindings": [] }
        })
    }

    /// A GBIF species document with a vernacular name.
    pub fn gbif_species(taxon_id: i64, vernacular: Option<&str>) -> Value {
        let mut doc = json!({
            "key": taxon_id,
            "scientificName": "Quercus robur L.",
            "kingdom": "Plantae",
        });
        if let Some(name) = vernacular {
            doc["vernacularName"] = json!(name);
        }
        doc
    }
}

//! Per-taxon enrichment: a cached common name plus images, audio and video.
//!
//! Names come from the GBIF species endpoint and are cached forever in the
//! key-value store. Media comes from the Wikidata SPARQL endpoint and is
//! fetched fresh on every lookup.

pub mod lookup;
pub mod media;
pub mod names;
pub mod wikidata;

pub use lookup::{EnrichmentLookup, TaxonDetails};
pub use media::{normalize_media, MediaItem, MediaKind};
pub use names::LocalizedNames;
pub use wikidata::{MediaSource, WikidataClient, WikidataConfig};

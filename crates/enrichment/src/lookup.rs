//! Combined name and media lookup for one taxon.

use std::sync::Arc;

use serde::Serialize;
use tracing::{instrument, warn};

use crate::media::MediaItem;
use crate::names::LocalizedNames;
use crate::wikidata::MediaSource;

/// Everything shown when a marker is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonDetails {
    pub taxon_id: i64,
    pub localized_name: Option<String>,
    pub media: Vec<MediaItem>,
    /// Non-fatal problems, e.g. media could not be loaded
    pub warnings: Vec<String>,
}

#[derive(Clone)]
pub struct EnrichmentLookup {
    names: LocalizedNames,
    media: Arc<dyn MediaSource>,
}

impl EnrichmentLookup {
    pub fn new(names: LocalizedNames, media: Arc<dyn MediaSource>) -> Self {
        Self { names, media }
    }

    pub fn names(&self) -> &LocalizedNames {
        &self.names
    }

    /// Name and media fetched concurrently. Neither failure fails the lookup:
    /// a name error leaves the name absent, a media error becomes a warning.
    #[instrument(skip(self))]
    pub async fn lookup(&self, taxon_id: i64) -> TaxonDetails {
        let (name, media) = futures::join!(
            self.names.localized_name(taxon_id),
            self.media.media(taxon_id)
        );

        let mut warnings = Vec::new();

        let localized_name = name.unwrap_or_else(|e| {
            warn!(taxon_id, error = %e, "Name lookup failed");
            None
        });

        let media = match media {
            Ok(items) => items,
            Err(e) => {
                warn!(taxon_id, error = %e, "Media lookup failed");
                warnings.push(format!("Media unavailable: {}", e));
                Vec::new()
            }
        };

        TaxonDetails {
            taxon_id,
            localized_name,
            media,
            warnings,
        }
    }
}

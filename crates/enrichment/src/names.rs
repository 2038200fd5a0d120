//! Localized (vernacular) names, cached forever.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use biodiv_common::BiodivResult;
use gbif_client::SpeciesLookup;
use storage::KeyValueStore;

/// Cached value meaning "looked up, no name exists".
const NO_NAME: &str = "";

pub fn name_key(taxon_id: i64) -> String {
    format!("localized-name:{}", taxon_id)
}

/// Name lookups backed by the key-value store.
///
/// Both hits and confirmed misses are cached, so each taxon reaches the
/// species endpoint at most once.
#[derive(Clone)]
pub struct LocalizedNames {
    store: Arc<dyn KeyValueStore>,
    species: Arc<dyn SpeciesLookup>,
}

impl LocalizedNames {
    pub fn new(store: Arc<dyn KeyValueStore>, species: Arc<dyn SpeciesLookup>) -> Self {
        Self { store, species }
    }

    #[instrument(skip(self))]
    pub async fn localized_name(&self, taxon_id: i64) -> BiodivResult<Option<String>> {
        let key = name_key(taxon_id);

        match self.store.get(&key).await {
            Ok(Some(cached)) => {
                debug!(taxon_id, "Name cache hit");
                return Ok(Some(cached).filter(|name| name != NO_NAME));
            }
            Ok(None) => {}
            Err(e) => warn!(taxon_id, error = %e, "Name cache read failed, querying upstream"),
        }

        let name = self.species.vernacular_name(taxon_id).await?;

        let cached = name.as_deref().unwrap_or(NO_NAME);
        if let Err(e) = self.store.set(&key, cached).await {
            warn!(taxon_id, error = %e, "Failed to cache name");
        }

        Ok(name)
    }
}

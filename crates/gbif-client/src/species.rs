//! Species name lookups.

use async_trait::async_trait;
use tracing::{debug, instrument};

use biodiv_common::{BiodivError, BiodivResult};

use crate::occurrence::GbifClient;
use crate::wire::SpeciesResponse;

/// Resolves a taxon to its common (vernacular) name.
#[async_trait]
pub trait SpeciesLookup: Send + Sync {
    /// `Ok(None)` when the taxon is unknown or has no vernacular name.
    async fn vernacular_name(&self, taxon_id: i64) -> BiodivResult<Option<String>>;
}

#[async_trait]
impl SpeciesLookup for GbifClient {
    #[instrument(skip(self))]
    async fn vernacular_name(&self, taxon_id: i64) -> BiodivResult<Option<String>> {
        let url = self.endpoint(&format!("species/{}", taxon_id));

        match self
            .fetcher()
            .get_json::<SpeciesResponse>(&url, &[], "application/json")
            .await
        {
            Ok(species) => Ok(species
                .vernacular_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())),
            Err(BiodivError::RemoteFetchFailed {
                status: Some(404), ..
            }) => {
                debug!(taxon_id, "Taxon not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

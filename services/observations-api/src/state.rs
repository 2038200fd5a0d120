//! Application state for the observations API.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

use biodiv_common::SystemClock;
use enrichment::{EnrichmentLookup, LocalizedNames, WikidataClient, WikidataConfig};
use gbif_client::{GbifClient, GbifConfig};
use storage::open_store;
use sync_engine::{CellCacheStore, SyncOrchestrator, SyncSettings};

use crate::config::ServiceConfig;
use crate::geolocation::{FixedPosition, PositionProvider};
use crate::viewport::ViewportSize;

/// Shared application state.
pub struct AppState {
    pub orchestrator: SyncOrchestrator,
    pub enrichment: EnrichmentLookup,
    pub position: Arc<dyn PositionProvider>,
    pub geolocation_timeout: Duration,
    pub viewport_size: ViewportSize,
    /// Prometheus recorder handle, absent when no recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Wire up store, clients and engine from configuration.
    pub async fn new(config: &ServiceConfig, metrics: Option<PrometheusHandle>) -> Result<Self> {
        let store = open_store(&config.store()?).await?;

        let gbif = Arc::new(GbifClient::new(GbifConfig::with_base_url(
            config.gbif_base_url.clone(),
        ))?);
        let wikidata = Arc::new(WikidataClient::new(WikidataConfig::with_endpoint(
            config.wikidata_endpoint.clone(),
        ))?);

        let cells = Arc::new(CellCacheStore::new(
            Arc::clone(&store),
            gbif.clone(),
            Arc::new(SystemClock),
            SyncSettings {
                max_uncertainty_m: config.max_uncertainty_m,
            },
        ));
        let orchestrator = SyncOrchestrator::with_threshold(cells, config.sync_threshold);

        let enrichment = EnrichmentLookup::new(LocalizedNames::new(store, gbif), wikidata);

        let home = config.home_position();
        info!(
            gbif = %config.gbif_base_url,
            sync_threshold = config.sync_threshold,
            home_position = home.is_some(),
            "Application state initialized"
        );

        Ok(Self {
            orchestrator,
            enrichment,
            position: Arc::new(FixedPosition(home)),
            geolocation_timeout: config.geolocation_timeout(),
            viewport_size: config.viewport_size(),
            metrics,
        })
    }
}

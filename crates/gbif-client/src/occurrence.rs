//! Paginated occurrence search.

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use biodiv_common::{BiodivResult, DateRange, OccurrenceRecord};
use spatial_index::CellPolygon;

use crate::config::GbifConfig;
use crate::http::JsonFetcher;
use crate::pager::Pager;
use crate::wire::{SearchPage, OCCURRENCE_FIELDS};

/// Source of occurrence records for a polygon and date window.
#[async_trait]
pub trait OccurrenceSearch: Send + Sync {
    /// All records inside `polygon` whose last interpretation date falls in
    /// `range`, with coordinate uncertainty up to `max_uncertainty_m`.
    ///
    /// Either every page is fetched or an error is returned; partial results
    /// are never handed back.
    async fn search(
        &self,
        polygon: &CellPolygon,
        range: DateRange,
        max_uncertainty_m: u32,
    ) -> BiodivResult<Vec<OccurrenceRecord>>;
}

/// HTTP client for the GBIF API.
#[derive(Debug, Clone)]
pub struct GbifClient {
    fetcher: JsonFetcher,
    config: GbifConfig,
}

impl GbifClient {
    pub fn new(config: GbifConfig) -> BiodivResult<Self> {
        let fetcher = JsonFetcher::new(
            config.request_timeout,
            config.connect_timeout,
            &config.user_agent,
            config.retry.clone(),
        )?;
        Ok(Self { fetcher, config })
    }

    pub fn config(&self) -> &GbifConfig {
        &self.config
    }

    pub(crate) fn fetcher(&self) -> &JsonFetcher {
        &self.fetcher
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl OccurrenceSearch for GbifClient {
    #[instrument(skip(self, polygon), fields(range = %range.to_query_value()))]
    async fn search(
        &self,
        polygon: &CellPolygon,
        range: DateRange,
        max_uncertainty_m: u32,
    ) -> BiodivResult<Vec<OccurrenceRecord>> {
        let url = self.endpoint("occurrence/search");
        let geometry = polygon.to_wkt();
        let mut pager = Pager::new(self.config.page_size);
        let mut records = Vec::new();
        let mut dropped = 0usize;

        while let Some(offset) = pager.next_offset() {
            let query = [
                ("geometry", geometry.clone()),
                ("fields", OCCURRENCE_FIELDS.to_string()),
                ("lastInterpreted", range.to_query_value()),
                ("coordinateUncertaintyInMeters", format!("0,{}", max_uncertainty_m)),
                ("limit", pager.page_size().to_string()),
                ("offset", offset.to_string()),
            ];

            let page: SearchPage = self
                .fetcher
                .get_json(&url, &query, "application/json")
                .await?;

            debug!(
                offset,
                returned = page.results.len(),
                count = page.count,
                end_of_records = page.end_of_records,
                "Fetched occurrence page"
            );

            pager.record_page(page.results.len(), page.count);
            for raw in page.results {
                match raw.into_record() {
                    Some(record) => records.push(record),
                    None => dropped += 1,
                }
            }
        }

        info!(
            records = records.len(),
            dropped,
            requests = pager.requests(),
            "Occurrence search complete"
        );

        Ok(records)
    }
}

//! Wikidata SPARQL media source.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use biodiv_common::BiodivResult;
use gbif_client::{JsonFetcher, RetryPolicy};

use crate::media::{normalize_media, MediaItem, MediaKind};

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Source of media for a taxon.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Media for `taxon_id`, already normalized. No match is an empty list.
    async fn media(&self, taxon_id: i64) -> BiodivResult<Vec<MediaItem>>;
}

#[derive(Debug, Clone)]
pub struct WikidataConfig {
    /// SPARQL endpoint URL
    pub endpoint: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub retry: RetryPolicy,
    pub user_agent: String,
}

impl WikidataConfig {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

impl Default for WikidataConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://query.wikidata.org/sparql".to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            user_agent: concat!("nearby-biodiversity/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Query for items whose GBIF taxon id (P846) matches, with optional image
/// (P18), audio (P51) and video (P10).
pub fn media_query(taxon_id: i64) -> String {
    format!(
        r#"SELECT ?item ?itemLabel ?image ?audio ?video WHERE {{
  ?item wdt:P846 "{taxon_id}" .
  OPTIONAL {{ ?item wdt:P18 ?image . }}
  OPTIONAL {{ ?item wdt:P51 ?audio . }}
  OPTIONAL {{ ?item wdt:P10 ?video . }}
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "[AUTO_LANGUAGE],en". }}
}}"#
    )
}

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    #[serde(default)]
    bindings: Vec<HashMap<String, SparqlTerm>>,
}

#[derive(Debug, Deserialize)]
struct SparqlTerm {
    value: String,
}

/// Extract media from SPARQL bindings in binding order.
/// Bindings without any media URL are skipped. The optional clauses of the
/// query multiply out, so the same URL can appear in several bindings.
fn media_from_bindings(bindings: Vec<HashMap<String, SparqlTerm>>) -> Vec<MediaItem> {
    let mut items = Vec::new();
    for binding in bindings {
        let label = binding.get("itemLabel").map(|t| t.value.clone());
        for kind in MediaKind::ALL {
            if let Some(term) = binding.get(kind.variable()) {
                items.push(MediaItem {
                    url: term.value.clone(),
                    kind,
                    label: label.clone(),
                });
            }
        }
    }
    items
}

/// Parse a SPARQL JSON result into normalized media.
pub fn parse_media(body: serde_json::Value) -> BiodivResult<Vec<MediaItem>> {
    let response: SparqlResponse = serde_json::from_value(body)?;
    Ok(normalize_media(media_from_bindings(response.results.bindings)))
}

#[derive(Debug, Clone)]
pub struct WikidataClient {
    fetcher: JsonFetcher,
    endpoint: String,
}

impl WikidataClient {
    pub fn new(config: WikidataConfig) -> BiodivResult<Self> {
        let fetcher = JsonFetcher::new(
            config.request_timeout,
            config.connect_timeout,
            &config.user_agent,
            config.retry,
        )?;
        Ok(Self {
            fetcher,
            endpoint: config.endpoint,
        })
    }
}

#[async_trait]
impl MediaSource for WikidataClient {
    #[instrument(skip(self))]
    async fn media(&self, taxon_id: i64) -> BiodivResult<Vec<MediaItem>> {
        let query = [("query", media_query(taxon_id))];
        let body: serde_json::Value = self
            .fetcher
            .get_json(&self.endpoint, &query, SPARQL_RESULTS_JSON)
            .await?;

        let items = parse_media(body)?;
        debug!(taxon_id, items = items.len(), "Media resolved");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_mentions_taxon_and_properties() {
        let q = media_query(2878688);
        assert!(q.contains(r#"wdt:P846 "2878688""#));
        assert!(q.contains("wdt:P18"));
        assert!(q.contains("wdt:P51"));
        assert!(q.contains("wdt:P10"));
    }

    #[test]
    fn test_bindings_without_media_are_skipped() {
        let body = json!({
            "results": { "bindings": [
                { "item": { "type": "uri", "value": "http://www.wikidata.org/entity/Q1" } },
                {
                    "itemLabel": { "type": "literal", "value": "Oak" },
                    "image": { "type": "uri", "value": "http://x/oak.jpg" }
                }
            ]}
        });

        let items = parse_media(body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://x/oak.jpg");
        assert_eq!(items[0].label.as_deref(), Some("Oak"));
    }

    #[test]
    fn test_one_binding_with_several_kinds() {
        let body = json!({
            "results": { "bindings": [{
                "video": { "value": "https://x/v.webm" },
                "image": { "value": "https://x/i.jpg" }
            }]}
        });

        let kinds: Vec<_> = parse_media(body).unwrap().into_iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![MediaKind::Image, MediaKind::Video]);
    }

    #[test]
    fn test_cross_product_bindings_yield_each_url_once() {
        let binding = |image: &str, audio: &str| {
            json!({
                "itemLabel": { "value": "Robin" },
                "image": { "value": format!("http://x/{}", image) },
                "audio": { "value": format!("http://x/{}", audio) }
            })
        };
        let body = json!({
            "results": { "bindings": [
                binding("A.jpg", "X.ogg"),
                binding("A.jpg", "Y.ogg"),
                binding("B.jpg", "X.ogg"),
                binding("B.jpg", "Y.ogg"),
            ]}
        });

        let urls: Vec<_> = parse_media(body).unwrap().into_iter().map(|m| m.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://x/A.jpg",
                "https://x/B.jpg",
                "https://x/X.ogg",
                "https://x/Y.ogg"
            ]
        );
    }

    #[test]
    fn test_missing_results_is_parse_error() {
        assert!(parse_media(json!({ "head": {} })).is_err());
    }
}

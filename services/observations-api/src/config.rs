//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;

use biodiv_common::BiodivResult;
use storage::StoreConfig;

use crate::geolocation::Position;
use crate::viewport::ViewportSize;

/// Observations API server
#[derive(Parser, Debug, Clone)]
#[command(name = "observations-api")]
#[command(about = "Serves nearby biodiversity observations for a map front-end")]
pub struct ServiceConfig {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8090", env = "OBSERVATIONS_LISTEN_ADDR")]
    pub listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Number of worker threads
    #[arg(long, env = "OBSERVATIONS_WORKER_THREADS")]
    pub worker_threads: Option<usize>,

    /// Cache backend: memory, sqlite or redis
    #[arg(long, default_value = "sqlite", env = "STORE_BACKEND")]
    pub store_backend: String,

    /// SQLite file path or Redis URL, depending on the backend
    #[arg(long, env = "STORE_LOCATION")]
    pub store_location: Option<String>,

    /// GBIF API root
    #[arg(long, default_value = "https://api.gbif.org/v1", env = "GBIF_BASE_URL")]
    pub gbif_base_url: String,

    /// Wikidata SPARQL endpoint
    #[arg(
        long,
        default_value = "https://query.wikidata.org/sparql",
        env = "WIKIDATA_ENDPOINT"
    )]
    pub wikidata_endpoint: String,

    /// Above this many visible cells only cached data is served
    #[arg(long, default_value_t = sync_engine::DEFAULT_SYNC_THRESHOLD, env = "SYNC_THRESHOLD")]
    pub sync_threshold: usize,

    /// Largest accepted coordinate uncertainty in meters
    #[arg(long, default_value_t = 500, env = "MAX_UNCERTAINTY_M")]
    pub max_uncertainty_m: u32,

    /// Latitude of the fixed user position
    #[arg(long, env = "HOME_LAT", requires = "home_lon", allow_hyphen_values = true)]
    pub home_lat: Option<f64>,

    /// Longitude of the fixed user position
    #[arg(long, env = "HOME_LON", requires = "home_lat", allow_hyphen_values = true)]
    pub home_lon: Option<f64>,

    /// Seconds to wait for a position fix
    #[arg(long, default_value_t = 5, env = "GEOLOCATION_TIMEOUT_SECS")]
    pub geolocation_timeout_secs: u64,

    /// Map viewport width in pixels
    #[arg(long, default_value_t = 390, env = "VIEWPORT_WIDTH_PX")]
    pub viewport_width_px: u32,

    /// Map viewport height in pixels
    #[arg(long, default_value_t = 844, env = "VIEWPORT_HEIGHT_PX")]
    pub viewport_height_px: u32,
}

impl ServiceConfig {
    pub fn store(&self) -> BiodivResult<StoreConfig> {
        StoreConfig::from_parts(&self.store_backend, self.store_location.as_deref())
    }

    pub fn home_position(&self) -> Option<Position> {
        match (self.home_lat, self.home_lon) {
            (Some(lat), Some(lng)) => Some(Position { lat, lng }),
            _ => None,
        }
    }

    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.geolocation_timeout_secs)
    }

    pub fn viewport_size(&self) -> ViewportSize {
        ViewportSize {
            width_px: self.viewport_width_px,
            height_px: self.viewport_height_px,
        }
    }
}

//! Client configuration.

use std::time::Duration;

/// Retry behavior for upstream requests.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first try
    pub max_retries: u32,
    /// Initial retry delay (doubles each retry)
    pub initial_delay: Duration,
    /// Maximum retry delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Retries without sleeping in between (for tests).
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        std::cmp::min(self.initial_delay.saturating_mul(factor), self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

/// Configuration for the GBIF client.
#[derive(Debug, Clone)]
pub struct GbifConfig {
    /// API root, e.g. `https://api.gbif.org/v1`
    pub base_url: String,
    /// Records requested per page
    pub page_size: usize,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    pub retry: RetryPolicy,
    pub user_agent: String,
}

impl GbifConfig {
    /// Default configuration pointed at another API root (mock servers, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for GbifConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.gbif.org/v1".to_string(),
            page_size: 300,
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            user_agent: concat!("nearby-biodiversity/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

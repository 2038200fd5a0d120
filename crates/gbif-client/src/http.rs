//! JSON GET with retry and exponential backoff.

use std::time::Duration;

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use biodiv_common::{BiodivError, BiodivResult};

use crate::config::RetryPolicy;

/// Issues JSON GET requests, retrying transient failures.
#[derive(Debug, Clone)]
pub struct JsonFetcher {
    client: Client,
    retry: RetryPolicy,
}

impl JsonFetcher {
    /// Create a fetcher with its own connection pool.
    pub fn new(
        request_timeout: Duration,
        connect_timeout: Duration,
        user_agent: &str,
        retry: RetryPolicy,
    ) -> BiodivResult<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .pool_max_idle_per_host(4)
            .tcp_nodelay(true)
            .user_agent(user_agent)
            .build()
            .map_err(|e| BiodivError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, retry })
    }

    /// GET `url` with `query` and decode the JSON body.
    ///
    /// Transport errors, 429 and 5xx are retried per the policy; other
    /// statuses fail at once. Exhaustion returns the last error.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        accept: &str,
    ) -> BiodivResult<T> {
        let mut retry_count = 0;

        loop {
            match self.try_get_json(url, query, accept).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if !is_retryable(&e) {
                        return Err(e);
                    }

                    retry_count += 1;
                    if retry_count > self.retry.max_retries {
                        warn!(
                            url = %url,
                            error = %e,
                            attempts = retry_count,
                            "Upstream request failed, retries exhausted"
                        );
                        return Err(e);
                    }

                    let delay = self.retry.delay_for(retry_count);
                    warn!(
                        url = %url,
                        error = %e,
                        retry = retry_count,
                        max_retries = self.retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Upstream request failed, retrying"
                    );

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn try_get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        accept: &str,
    ) -> BiodivResult<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header(header::ACCEPT, accept)
            .send()
            .await
            .map_err(|e| BiodivError::transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BiodivError::remote_status(
                status.as_u16(),
                format!("GET {} returned {}", url, status),
            ));
        }

        debug!(url = %url, status = status.as_u16(), "Upstream response");

        response
            .json::<T>()
            .await
            .map_err(|e| BiodivError::ParseError(format!("Invalid JSON from {}: {}", url, e)))
    }
}

/// Whether an upstream error is worth another attempt.
pub fn is_retryable(err: &BiodivError) -> bool {
    match err {
        BiodivError::RemoteFetchFailed { status: None, .. } => true,
        BiodivError::RemoteFetchFailed {
            status: Some(status),
            ..
        } => *status == 429 || *status >= 500,
        _ => false,
    }
}

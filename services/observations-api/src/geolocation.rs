//! Where the user is.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use biodiv_common::{BiodivError, BiodivResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// One-shot position source.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self) -> BiodivResult<Position>;
}

/// A position set in configuration, or none at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Option<Position>);

#[async_trait]
impl PositionProvider for FixedPosition {
    async fn current_position(&self) -> BiodivResult<Position> {
        self.0.ok_or_else(|| {
            BiodivError::GeolocationUnavailable("no position configured".to_string())
        })
    }
}

/// Ask `provider` for a fix, giving up after `timeout`.
pub async fn locate(provider: &dyn PositionProvider, timeout: Duration) -> BiodivResult<Position> {
    match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "Position fix timed out");
            Err(BiodivError::GeolocationUnavailable(format!(
                "no fix within {:?}",
                timeout
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverAnswers;

    #[async_trait]
    impl PositionProvider for NeverAnswers {
        async fn current_position(&self) -> BiodivResult<Position> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_fixed_position() {
        let here = Position {
            lat: 52.5,
            lng: 13.4,
        };
        let found = locate(&FixedPosition(Some(here)), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(found, here);
    }

    #[tokio::test]
    async fn test_missing_position_is_unavailable() {
        let err = locate(&FixedPosition(None), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, BiodivError::GeolocationUnavailable(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_unavailable() {
        let err = locate(&NeverAnswers, Duration::from_millis(20))
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), 503);
    }
}

//! Error types for the observation sync engine and its collaborators.

use thiserror::Error;

/// Result type alias using BiodivError.
pub type BiodivResult<T> = Result<T, BiodivError>;

/// Primary error type for cache, sync and lookup operations.
#[derive(Debug, Error)]
pub enum BiodivError {
    // === Request Errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid BBOX: {0}")]
    InvalidBbox(String),

    #[error("Invalid cell id: {0}")]
    InvalidCell(String),

    // === Remote Errors ===
    /// A remote HTTP call failed. `status` is absent for transport failures
    /// (connect errors, timeouts) that never produced a response.
    #[error("Remote fetch failed (status {}): {message}", status.map(|s| s.to_string()).unwrap_or_else(|| "none".to_string()))]
    RemoteFetchFailed { status: Option<u16>, message: String },

    #[error("Failed to parse remote response: {0}")]
    ParseError(String),

    // === Cache Errors ===
    #[error("Malformed cache entry for key '{key}': {message}")]
    MalformedCacheEntry { key: String, message: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    // === Environment Errors ===
    #[error("Geolocation unavailable: {0}")]
    GeolocationUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl BiodivError {
    /// Shorthand for a remote failure that carried an HTTP status.
    pub fn remote_status(status: u16, message: impl Into<String>) -> Self {
        BiodivError::RemoteFetchFailed {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Shorthand for a remote failure with no HTTP response.
    pub fn transport(message: impl Into<String>) -> Self {
        BiodivError::RemoteFetchFailed {
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status of the upstream failure, if any.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            BiodivError::RemoteFetchFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// Get the HTTP status code this error maps to at the API surface.
    pub fn http_status_code(&self) -> u16 {
        match self {
            BiodivError::MissingParameter(_)
            | BiodivError::InvalidBbox(_)
            | BiodivError::InvalidCell(_) => 400,

            BiodivError::RemoteFetchFailed { .. } | BiodivError::ParseError(_) => 502,

            BiodivError::GeolocationUnavailable(_) => 503,

            _ => 500,
        }
    }
}

impl From<std::io::Error> for BiodivError {
    fn from(err: std::io::Error) -> Self {
        BiodivError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for BiodivError {
    fn from(err: serde_json::Error) -> Self {
        BiodivError::ParseError(format!("JSON error: {}", err))
    }
}

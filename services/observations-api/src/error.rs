//! Error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use biodiv_common::BiodivError;

/// A `BiodivError` rendered as a JSON body with the matching HTTP status.
#[derive(Debug)]
pub struct ApiError(pub BiodivError);

impl From<BiodivError> for ApiError {
    fn from(err: BiodivError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::warn!(error = %self.0, "Request failed");
        }

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
                "status": status.as_u16(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = ApiError(BiodivError::InvalidBbox("bad".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError(BiodivError::remote_status(503, "down")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}

//! Scripted HTTP upstream for client tests.
//!
//! Binds an axum server on `127.0.0.1:0`, records every request, and answers
//! with whatever the supplied responder returns for it.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::generators::gbif_page;

/// A request as seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
}

impl RecordedRequest {
    /// Query parameter parsed as a number, if present.
    pub fn query_usize(&self, name: &str) -> Option<usize> {
        self.query.get(name).and_then(|v| v.parse().ok())
    }
}

/// What the mock answers with.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: Value,
}

impl MockResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": "scripted failure" }),
        }
    }
}

type Responder = dyn Fn(&RecordedRequest) -> MockResponse + Send + Sync;

struct Inner {
    responder: Box<Responder>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Running mock server. The server task is aborted on drop.
pub struct MockUpstream {
    addr: SocketAddr,
    inner: Arc<Inner>,
    handle: JoinHandle<()>,
}

impl MockUpstream {
    /// Start a server that answers every request through `responder`.
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
    {
        let inner = Arc::new(Inner {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .fallback(handle_request)
            .with_state(Arc::clone(&inner));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock upstream");
        let addr = listener.local_addr().expect("Mock upstream has no address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            addr,
            inner,
            handle,
        }
    }

    /// Upstream serving `total` generated occurrence records with offset paging.
    ///
    /// Record ids are `0..total`. Pages honor the request's `offset`/`limit`.
    pub async fn gbif_occurrences(total: usize) -> Self {
        Self::start(move |req| {
            let offset = req.query_usize("offset").unwrap_or(0);
            let limit = req.query_usize("limit").unwrap_or(20);
            let start = offset.min(total);
            let end = (offset + limit).min(total);
            MockResponse::ok(gbif_page(start as i64..end as i64, offset, limit, total))
        })
        .await
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn request_count(&self) -> usize {
        self.inner.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner
            .requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_request(
    State(inner): State<Arc<Inner>>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let request = RecordedRequest {
        path: uri.path().to_string(),
        query,
    };

    let response = (inner.responder)(&request);
    if let Ok(mut requests) = inner.requests.lock() {
        requests.push(request);
    }

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_requests() {
        let mock = MockUpstream::start(|_| MockResponse::status(503)).await;
        assert_eq!(mock.request_count(), 0);
        assert!(mock.base_url().starts_with("http://127.0.0.1:"));
    }
}

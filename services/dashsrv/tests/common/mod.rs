//! Shared helpers for DashSrv integration tests

#![allow(dead_code)]
#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use dashsrv::api::create_router;
use dashsrv::config::{DashConfig, UpstreamConfig};
use dashsrv::AppState;

/// Router wired to an upstream at `base_url`
pub fn app_for(base_url: &str) -> Router {
    let config = DashConfig {
        upstream: UpstreamConfig {
            base_url: base_url.to_string(),
            timeout_ms: 1000,
        },
        ..Default::default()
    };
    create_router(AppState::from_config(config).unwrap())
}

/// Upstream address nothing listens on
pub const DEAD_UPSTREAM: &str = "http://127.0.0.1:9";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn data_source(&self) -> &str {
        self.headers
            .get("x-data-source")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }
}

pub async fn send(app: Router, method: Method, uri: &str) -> TestResponse {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri).await
}

/// Alarm in backend shape
pub fn upstream_alarm(id: i64, severity: &str) -> Value {
    json!({
        "id": id,
        "startDate": format!("2025-11-{:02}T10:00:00", id % 28 + 1),
        "severity": severity,
        "productionStep": null,
        "batches": []
    })
}

/// Batch in backend shape; later `n` starts later
pub fn upstream_batch(n: usize, status: &str) -> Value {
    json!({
        "batchId": format!("batch-{:04}", n),
        "batchNumber": format!("BATCH-{}", 1000 + n),
        "productionOrderNumber": format!("PO-{}", 2000 + n),
        "recipeId": format!("RECIPE-{:03}", n % 20),
        "plannedStartTime": null,
        "actualStartTime": format!("2025-11-{:02}T{:02}:00:00", n / 24 + 1, n % 24),
        "plannedEndTime": null,
        "actualEndTime": null,
        "executionStatus": status,
        "internalId": n,
        "name": null
    })
}

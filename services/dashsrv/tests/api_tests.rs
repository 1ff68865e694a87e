//! DashSrv HTTP tests against a mocked backend

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{app_for, get, send, upstream_alarm, upstream_batch, DEAD_UPSTREAM};

async fn backend_with(path_str: &str, body: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(path_str))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_critical_filter_returns_single_alarm() {
    let server = backend_with(
        "/api/alarms",
        json!([
            upstream_alarm(0, "Critical"),
            upstream_alarm(1, "Info"),
            upstream_alarm(2, "Warning")
        ]),
    )
    .await;

    let response = get(
        app_for(&server.uri()),
        "/api/alarms?severity=critical&page=1&limit=20",
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data_source(), "upstream");
    assert_eq!(response.body["total"], 1);
    assert_eq!(response.body["page"], 1);
    assert_eq!(response.body["totalPages"], 1);
    let alarms = response.body["alarms"].as_array().unwrap();
    assert_eq!(alarms.len(), 1);
    assert_eq!(alarms[0]["id"], "0");
    assert_eq!(alarms[0]["severity"], "critical");
    assert_eq!(alarms[0]["equipment_id"], "REACTOR-A1");
    assert_eq!(alarms[0]["batch_id"], "BATCH-2024-000");
}

#[tokio::test]
async fn test_severity_is_forwarded_in_backend_spelling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alarms"))
        .and(query_param("severity", "Warning"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([upstream_alarm(5, "Warning")])))
        .expect(1)
        .mount(&server)
        .await;

    let response = get(app_for(&server.uri()), "/api/alarms?severity=warning").await;
    assert_eq!(response.data_source(), "upstream");
    assert_eq!(response.body["total"], 1);
}

#[tokio::test]
async fn test_start_timestamp_is_forwarded_as_day() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alarms"))
        .and(query_param("startDate", "2025-11-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([upstream_alarm(3, "Info")])))
        .mount(&server)
        .await;
    // the backend rejects anything but a plain date
    Mock::given(method("GET"))
        .and(path("/api/alarms"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let response = get(
        app_for(&server.uri()),
        "/api/alarms?start_date=2025-11-01T10:00:00",
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data_source(), "upstream");
    assert_eq!(response.body["total"], 1);
    assert_eq!(response.body["alarms"][0]["id"], "3");
}

#[tokio::test]
async fn test_second_page_of_batches() {
    let batches: Vec<Value> = (0..25).map(|n| upstream_batch(n, "COMPLETED")).collect();
    let server = backend_with("/api/batches", Value::Array(batches)).await;

    let response = get(app_for(&server.uri()), "/api/batches?page=2&limit=20").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["page"], 2);
    assert_eq!(response.body["total"], 25);
    assert_eq!(response.body["totalPages"], 2);
    let page = response.body["batches"].as_array().unwrap();
    assert_eq!(page.len(), 5);
    // newest first: page two holds the five earliest starts
    assert_eq!(page[0]["batch_number"], "BATCH-1004");
    assert_eq!(page[4]["batch_number"], "BATCH-1000");
}

#[tokio::test]
async fn test_batch_filters_and_sort() {
    let server = backend_with(
        "/api/batches",
        json!([
            upstream_batch(1, "COMPLETED"),
            upstream_batch(30, "IN_PROGRESS"),
            upstream_batch(2, "FAILED"),
            upstream_batch(41, "COMPLETED")
        ]),
    )
    .await;

    let response = get(
        app_for(&server.uri()),
        "/api/batches?execution_status=COMPLETED&production_order_number=po-20",
    )
    .await;
    let numbers: Vec<&str> = response.body["batches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["batch_number"].as_str().unwrap())
        .collect();
    assert_eq!(numbers, vec!["BATCH-1041", "BATCH-1001"]);
    assert_eq!(response.body["batches"][0]["id"], 41);
    assert!(response.body["batches"][0]["line_id"].is_null());

    let response = get(
        app_for(&server.uri()),
        "/api/batches?start_date=2025-11-02&end_date=2025-11-02",
    )
    .await;
    assert_eq!(response.body["total"], 2);
}

#[tokio::test]
async fn test_null_backend_fields_keep_live_data() {
    let mut partial_batch = upstream_batch(7, "FAILED");
    partial_batch["recipeId"] = Value::Null;
    partial_batch["executionStatus"] = Value::Null;
    let mut partial_alarm = upstream_alarm(1, "Info");
    partial_alarm["severity"] = Value::Null;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/batches"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([upstream_batch(3, "COMPLETED"), partial_batch])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/alarms"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([upstream_alarm(0, "Critical"), partial_alarm])),
        )
        .mount(&server)
        .await;

    let response = get(app_for(&server.uri()), "/api/batches").await;
    assert_eq!(response.data_source(), "upstream");
    assert_eq!(response.body["total"], 2);
    let batches = response.body["batches"].as_array().unwrap();
    assert_eq!(batches[0]["batch_number"], "BATCH-1007");
    assert_eq!(batches[0]["recipe_id"], "");
    assert_eq!(batches[0]["execution_status"], "PLANNED");

    let response = get(app_for(&server.uri()), "/api/alarms").await;
    assert_eq!(response.data_source(), "upstream");
    assert_eq!(response.body["total"], 2);
    assert_eq!(response.body["alarms"][1]["severity"], "info");

    let response = get(app_for(&server.uri()), "/api/dashboard/alarm-stats").await;
    assert_eq!(
        response.body,
        json!({"total": 2, "critical": 1, "warning": 0, "info": 1, "active": 1})
    );
}

#[tokio::test]
async fn test_unknown_status_matches_nothing() {
    let server = backend_with("/api/batches", json!([upstream_batch(1, "COMPLETED")])).await;
    let response = get(app_for(&server.uri()), "/api/batches?execution_status=PAUSED").await;
    assert_eq!(response.body["total"], 0);
    assert_eq!(response.body["totalPages"], 0);
    assert_eq!(response.data_source(), "upstream");
}

#[tokio::test]
async fn test_invalid_paging_uses_defaults() {
    let alarms: Vec<Value> = (0..30).map(|id| upstream_alarm(id, "Info")).collect();
    let server = backend_with("/api/alarms", Value::Array(alarms)).await;

    let response = get(app_for(&server.uri()), "/api/alarms?page=abc&limit=0").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["page"], 1);
    assert_eq!(response.body["alarms"].as_array().unwrap().len(), 20);
    assert_eq!(response.body["totalPages"], 2);

    let response = get(app_for(&server.uri()), "/api/alarms?limit=1000").await;
    assert_eq!(response.body["alarms"].as_array().unwrap().len(), 30);
    assert_eq!(response.body["totalPages"], 1);
}

#[tokio::test]
#[traced_test]
async fn test_backend_error_serves_fallback_alarms() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alarms"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let response = get(app_for(&server.uri()), "/api/alarms?severity=critical").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data_source(), "fallback");
    assert_eq!(response.body["total"], 1);
    assert_eq!(response.body["page"], 1);
    assert_eq!(response.body["totalPages"], 1);
    assert_eq!(response.body["alarms"][0]["id"], "mock-1");
    assert_eq!(
        response.body["alarms"][0]["message"],
        "Backend connection failed - mock data displayed"
    );
    assert!(logs_contain("serving fallback data"));
    assert!(logs_contain("UPSTREAM_STATUS"));
}

#[tokio::test]
async fn test_unreachable_backend_serves_fallback_batches() {
    let response = get(app_for(DEAD_UPSTREAM), "/api/batches?page=3").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data_source(), "fallback");
    assert_eq!(response.body["page"], 1);
    assert_eq!(response.body["batches"][0]["batch_number"], "BATCH-1000");
    assert_eq!(response.body["batches"][0]["execution_status"], "COMPLETED");
}

#[tokio::test]
async fn test_undecodable_body_serves_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alarms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let response = get(app_for(&server.uri()), "/api/alarms").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data_source(), "fallback");
}

#[tokio::test]
async fn test_stats_counts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alarms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            upstream_alarm(0, "Critical"),
            upstream_alarm(1, "Warning"),
            upstream_alarm(2, "Info"),
            upstream_alarm(3, "Critical")
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/batches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            upstream_batch(0, "COMPLETED"),
            upstream_batch(1, "IN_PROGRESS"),
            upstream_batch(2, "FAILED"),
            upstream_batch(3, "PLANNED")
        ])))
        .mount(&server)
        .await;

    let response = get(app_for(&server.uri()), "/api/dashboard/alarm-stats").await;
    assert_eq!(
        response.body,
        json!({"total": 4, "critical": 2, "warning": 1, "info": 1, "active": 3})
    );

    let response = get(app_for(&server.uri()), "/api/dashboard/batch-stats").await;
    assert_eq!(
        response.body,
        json!({"total": 4, "completed": 1, "in_progress": 1, "failed": 1})
    );
}

#[tokio::test]
async fn test_stats_zero_when_backend_down() {
    let response = get(app_for(DEAD_UPSTREAM), "/api/dashboard/alarm-stats").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data_source(), "fallback");
    assert_eq!(
        response.body,
        json!({"total": 0, "critical": 0, "warning": 0, "info": 0, "active": 0})
    );

    let response = get(app_for(DEAD_UPSTREAM), "/api/dashboard/batch-stats").await;
    assert_eq!(
        response.body,
        json!({"total": 0, "completed": 0, "in_progress": 0, "failed": 0})
    );
}

#[tokio::test]
async fn test_non_get_is_rejected() {
    for (verb, uri) in [
        (Method::POST, "/api/alarms"),
        (Method::PUT, "/api/batches"),
        (Method::DELETE, "/api/dashboard/alarm-stats"),
        (Method::PATCH, "/api/dashboard/batch-stats"),
    ] {
        let response = send(app_for(DEAD_UPSTREAM), verb.clone(), uri).await;
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED, "{} {}", verb, uri);
        assert_eq!(response.body["error"], "Method not allowed");
        assert_eq!(response.body["status"], 405);
    }
}

#[tokio::test]
async fn test_health_reports_upstream() {
    let server = MockServer::start().await;
    let response = get(app_for(&server.uri()), "/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["service"], "dashsrv");
    assert_eq!(response.body["checks"]["upstream"]["status"], "healthy");

    let response = get(app_for(DEAD_UPSTREAM), "/health").await;
    assert_eq!(response.body["status"], "degraded");
    assert!(response.body["checks"]["upstream"]["message"].is_string());
}

#[tokio::test]
#[traced_test]
async fn test_requests_are_access_logged() {
    let response = get(app_for(DEAD_UPSTREAM), "/api/alarms?batch_id=mock").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(logs_contain("HTTP request"));
    assert!(logs_contain("path=/api/alarms"));
}

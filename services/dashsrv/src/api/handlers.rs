//! API handlers for the dashboard adapter

use std::time::Instant;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::debug;

use common::{ComponentHealth, HealthStatus};

use crate::api::models::{AlarmQuery, BatchQuery, DATA_SOURCE_HEADER};
use crate::error::AdapterError;
use crate::pipeline::{self, alarms, batches, Served};
use crate::AppState;

#[cfg(feature = "openapi")]
use dash_model::{AlarmStats, AlarmsResponse, BatchStats, BatchesResponse};

/// JSON body plus the `x-data-source` header
fn served<T: Serialize>(served: Served<T>) -> Response {
    (
        [(DATA_SOURCE_HEADER, served.source.as_str())],
        Json(served.body),
    )
        .into_response()
}

/// List alarms
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/alarms",
    tag = "dashboard",
    params(AlarmQuery),
    responses(
        (status = 200, description = "One page of alarms (fallback data when the backend is down)", body = AlarmsResponse),
        (status = 405, description = "Method not allowed")
    )
))]
pub async fn list_alarms(
    State(state): State<AppState>,
    Query(query): Query<AlarmQuery>,
) -> Response {
    debug!(?query, "List alarms");
    served(alarms::serve(state.upstream.as_ref(), &query, &state.config.pagination).await)
}

/// List batches, newest start first
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/batches",
    tag = "dashboard",
    params(BatchQuery),
    responses(
        (status = 200, description = "One page of batches (fallback data when the backend is down)", body = BatchesResponse),
        (status = 405, description = "Method not allowed")
    )
))]
pub async fn list_batches(
    State(state): State<AppState>,
    Query(query): Query<BatchQuery>,
) -> Response {
    debug!(?query, "List batches");
    served(batches::serve(state.upstream.as_ref(), &query, &state.config.pagination).await)
}

/// Alarm severity counts
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/dashboard/alarm-stats",
    tag = "dashboard",
    responses((status = 200, description = "Severity counts, zero when the backend is down", body = AlarmStats))
))]
pub async fn alarm_stats(State(state): State<AppState>) -> Response {
    served(pipeline::serve_alarm_stats(state.upstream.as_ref()).await)
}

/// Batch status counts
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/dashboard/batch-stats",
    tag = "dashboard",
    responses((status = 200, description = "Status counts, zero when the backend is down", body = BatchStats))
))]
pub async fn batch_stats(State(state): State<AppState>) -> Response {
    served(pipeline::serve_batch_stats(state.upstream.as_ref()).await)
}

/// Any verb other than GET on a dashboard endpoint
pub async fn method_not_allowed() -> AdapterError {
    AdapterError::MethodNotAllowed
}

/// Health check with upstream ping
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service health", body = HealthStatus))
))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let started = Instant::now();
    let ping = state.upstream.ping().await;
    let elapsed = started.elapsed().as_millis() as u64;

    let upstream = match ping {
        Ok(()) => ComponentHealth::healthy(elapsed),
        Err(e) => ComponentHealth::degraded(e.to_string(), elapsed),
    };

    Json(
        HealthStatus::new(
            "dashsrv",
            env!("CARGO_PKG_VERSION"),
            state.started_at.elapsed().as_secs(),
        )
        .with_check("upstream", upstream),
    )
}

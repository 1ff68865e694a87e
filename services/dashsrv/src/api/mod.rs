//! HTTP surface of DashSrv

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::create_router;

#[cfg(feature = "openapi")]
mod doc {
    use axum::Json;
    use utoipa::OpenApi;

    use super::handlers;

    #[derive(OpenApi)]
    #[openapi(
        paths(
            handlers::list_alarms,
            handlers::list_batches,
            handlers::alarm_stats,
            handlers::batch_stats,
            handlers::health_check,
        ),
        components(schemas(
            dash_model::AlarmsResponse,
            dash_model::BatchesResponse,
            dash_model::Alarm,
            dash_model::Batch,
            dash_model::AlarmSeverity,
            dash_model::ProductionStep,
            dash_model::ExecutionStatus,
            dash_model::AlarmStats,
            dash_model::BatchStats,
            common::HealthStatus,
            common::ComponentHealth,
            common::ServiceStatus,
        )),
        tags(
            (name = "dashboard", description = "Alarm and batch tables"),
            (name = "health", description = "Service health")
        )
    )]
    pub struct ApiDoc;

    pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
        Json(ApiDoc::openapi())
    }
}

#[cfg(feature = "openapi")]
pub use doc::{openapi_json, ApiDoc};

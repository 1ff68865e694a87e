//! API routes configuration

use axum::{middleware, routing::get, Router};

use common::logging::http_request_logger;
use dash_model::paths;

use crate::api::handlers::*;
use crate::AppState;

/// Create API routes
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route(paths::ALARMS, get(list_alarms).fallback(method_not_allowed))
        .route(paths::BATCHES, get(list_batches).fallback(method_not_allowed))
        .route(paths::ALARM_STATS, get(alarm_stats).fallback(method_not_allowed))
        .route(paths::BATCH_STATS, get(batch_stats).fallback(method_not_allowed));

    #[cfg(feature = "openapi")]
    let router = router.route("/openapi.json", get(super::openapi_json));

    router
        .layer(middleware::from_fn(http_request_logger))
        .with_state(state)
}

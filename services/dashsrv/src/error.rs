//! Error handling for DashSrv
//!
//! Upstream failures are absorbed by the pipeline (fallback data), so only
//! `MethodNotAllowed` and startup errors normally reach a response.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use errors::{DashError, DashErrorTrait, ErrorCategory};
use serde_json::json;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, AdapterError>;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Transport failure or timeout talking to the backend
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream returned HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Upstream response could not be decoded: {0}")]
    UpstreamDecode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DashError> for AdapterError {
    fn from(err: DashError) -> Self {
        match err {
            DashError::UpstreamUnavailable(msg)
            | DashError::Timeout(msg)
            | DashError::HttpClient(msg) => AdapterError::UpstreamUnavailable(msg),
            DashError::UpstreamStatus { status, url } => AdapterError::UpstreamStatus { status, url },
            DashError::Decode(msg) => AdapterError::UpstreamDecode(msg),
            DashError::Configuration(msg) => AdapterError::Config(msg),
            DashError::InvalidConfig { field, reason } => {
                AdapterError::Config(format!("{}: {}", field, reason))
            },
            other @ DashError::InvalidParameter { .. } => AdapterError::Internal(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        DashError::from(err).into()
    }
}

impl DashErrorTrait for AdapterError {
    fn error_code(&self) -> &'static str {
        match self {
            AdapterError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            AdapterError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            AdapterError::UpstreamStatus { .. } => "UPSTREAM_STATUS",
            AdapterError::UpstreamDecode(_) => "UPSTREAM_DECODE",
            AdapterError::Config(_) => "CONFIGURATION_ERROR",
            AdapterError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            AdapterError::MethodNotAllowed => ErrorCategory::Api,
            AdapterError::UpstreamUnavailable(_)
            | AdapterError::UpstreamStatus { .. }
            | AdapterError::UpstreamDecode(_) => ErrorCategory::Network,
            AdapterError::Config(_) => ErrorCategory::Configuration,
            AdapterError::Internal(_) => ErrorCategory::Internal,
        }
    }
}

// HTTP response conversion for Axum
impl IntoResponse for AdapterError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let message = match &self {
            AdapterError::Config(_) => "Configuration error".to_string(),
            AdapterError::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

//! Unified error handling for PlantOps dashboard services
//!
//! Shared by the adapter service and the dashboard query client so both sides
//! classify upstream and configuration failures the same way.

use thiserror::Error;

// ============================================================================
// DashError - Main error type
// ============================================================================

/// Main error type for dashboard services
#[derive(Debug, Error)]
pub enum DashError {
    // ======================================
    // Configuration Errors
    // ======================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    // ======================================
    // Upstream / Network Errors
    // ======================================
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream returned HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Upstream timeout: {0}")]
    Timeout(String),

    #[error("Upstream response could not be decoded: {0}")]
    Decode(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    // ======================================
    // Request Errors
    // ======================================
    #[error("Invalid parameter {param}: {reason}")]
    InvalidParameter { param: String, reason: String },
}

/// Result type alias using DashError
pub type DashResult<T> = Result<T, DashError>;

impl From<reqwest::Error> for DashError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::UpstreamUnavailable(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::UpstreamStatus {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            Self::HttpClient(err.to_string())
        }
    }
}

impl From<figment::Error> for DashError {
    fn from(err: figment::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl DashErrorTrait for DashError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::InvalidConfig { .. } => "INVALID_CONFIG",
            Self::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            Self::UpstreamStatus { .. } => "UPSTREAM_STATUS",
            Self::Timeout(_) => "TIMEOUT",
            Self::Decode(_) => "UPSTREAM_DECODE",
            Self::HttpClient(_) => "HTTP_CLIENT_ERROR",
            Self::InvalidParameter { .. } => "INVALID_PARAMETER",
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) | Self::InvalidConfig { .. } => ErrorCategory::Configuration,

            Self::UpstreamUnavailable(_)
            | Self::UpstreamStatus { .. }
            | Self::Decode(_)
            | Self::HttpClient(_) => ErrorCategory::Network,

            Self::Timeout(_) => ErrorCategory::Timeout,

            Self::InvalidParameter { .. } => ErrorCategory::Validation,
        }
    }
}

// ============================================================================
// Error trait - shared classification interface
// ============================================================================

/// Error category enum - used for classification and HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Timeout,
    Validation,
    Api,
    Internal,
}

/// Common interface for service-specific error types
///
/// Each service keeps its own error enum (e.g. the adapter's `AdapterError`)
/// and gains uniform codes, categories and HTTP statuses by implementing this.
pub trait DashErrorTrait: std::error::Error + Send + Sync + 'static {
    /// Get error code (for API, logs, monitoring)
    fn error_code(&self) -> &'static str;

    /// Get error category
    fn category(&self) -> ErrorCategory;

    /// Whether the error is retryable (default implementation is category-based)
    fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Timeout
        )
    }

    /// Convert to HTTP status code
    #[cfg(feature = "axum-support")]
    fn http_status(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::Api => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCategory::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorCategory::Network => StatusCode::BAD_GATEWAY,
        }
    }
}

//! Shared API models for dashboard services

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// ============================================================================
// Service Health & Status Models
// ============================================================================

/// Service health status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthStatus {
    /// Overall health status
    pub status: ServiceStatus,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Timestamp of this check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Individual component checks
    #[serde(default)]
    pub checks: BTreeMap<String, ComponentHealth>,
}

impl HealthStatus {
    /// Start a report with no component checks (reports healthy)
    pub fn new(service: impl Into<String>, version: impl Into<String>, uptime_seconds: u64) -> Self {
        Self {
            status: ServiceStatus::Healthy,
            service: service.into(),
            version: version.into(),
            uptime_seconds,
            timestamp: chrono::Utc::now(),
            checks: BTreeMap::new(),
        }
    }

    /// Add a component check and fold it into the overall status
    pub fn with_check(mut self, name: impl Into<String>, check: ComponentHealth) -> Self {
        self.status = self.status.worst(check.status);
        self.checks.insert(name.into(), check);
        self
    }
}

/// Service status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
    Unhealthy,
    Unknown,
}

impl ServiceStatus {
    fn rank(self) -> u8 {
        match self {
            ServiceStatus::Healthy => 0,
            ServiceStatus::Unknown => 1,
            ServiceStatus::Degraded => 2,
            ServiceStatus::Unhealthy => 3,
        }
    }

    /// The more severe of two statuses
    pub fn worst(self, other: ServiceStatus) -> ServiceStatus {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }
}

/// Component health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ComponentHealth {
    /// Component status
    pub status: ServiceStatus,
    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Check duration in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl ComponentHealth {
    pub fn healthy(duration_ms: u64) -> Self {
        Self {
            status: ServiceStatus::Healthy,
            message: None,
            duration_ms: Some(duration_ms),
        }
    }

    pub fn degraded(message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            status: ServiceStatus::Degraded,
            message: Some(message.into()),
            duration_ms: Some(duration_ms),
        }
    }
}

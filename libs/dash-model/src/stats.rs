//! Dashboard summary counters

use serde::{Deserialize, Serialize};

/// `GET /api/dashboard/alarm-stats` response body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AlarmStats {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    /// Alarms that are not informational
    pub active: usize,
}

/// `GET /api/dashboard/batch-stats` response body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BatchStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub failed: usize,
}

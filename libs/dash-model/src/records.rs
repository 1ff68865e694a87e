//! Upstream and normalized record shapes
//!
//! Upstream records are what the backend returns (camelCase, loosely typed).
//! Normalized records are what the dashboard consumes (snake_case, enums).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::types::{AlarmSeverity, ExecutionStatus, ProductionStep};

// ============================================================================
// Upstream records (read-only input)
// ============================================================================

/// Deserializer that reads an explicit `null` as the type's default
///
/// Pair with `#[serde(default)]` so a missing key behaves the same way.
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifier that upstream sends either as a string or as a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(i64),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Text(s) => f.write_str(s),
            RecordId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Batch reference attached to an upstream alarm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamBatchRef {
    pub id: RecordId,
}

/// Alarm as returned by `GET {upstream}/api/alarms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmUpstream {
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub start_date: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub severity: String,
    #[serde(default)]
    pub production_step: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub batches: Vec<UpstreamBatchRef>,
}

/// Batch as returned by `GET {upstream}/api/batches`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpstream {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub batch_id: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub batch_number: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub production_order_number: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub recipe_id: String,
    #[serde(default)]
    pub planned_start_time: Option<String>,
    #[serde(default)]
    pub actual_start_time: Option<String>,
    #[serde(default)]
    pub planned_end_time: Option<String>,
    #[serde(default)]
    pub actual_end_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub execution_status: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub internal_id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

// ============================================================================
// Normalized records (dashboard output)
// ============================================================================

/// Alarm in the shape the dashboard tables consume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Alarm {
    pub id: String,
    pub timestamp: String,
    pub severity: AlarmSeverity,
    pub equipment_id: String,
    pub production_step: ProductionStep,
    pub message: String,
    pub batch_id: String,
}

/// Batch in the shape the dashboard tables consume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Batch {
    pub batch_id: String,
    pub batch_number: String,
    pub production_order_number: String,
    pub recipe_id: String,
    pub planned_start_time: Option<String>,
    pub actual_start_time: Option<String>,
    pub planned_end_time: Option<String>,
    pub actual_end_time: Option<String>,
    pub execution_status: ExecutionStatus,
    pub id: i64,
    pub name: Option<String>,
    pub line_id: Option<String>,
}

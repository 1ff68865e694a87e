//! API request models

use serde::{Deserialize, Serialize};

/// Response header telling live answers from substituted ones
pub const DATA_SOURCE_HEADER: &str = "x-data-source";

/// Query parameters of `GET /api/alarms`
///
/// Everything arrives as text; unparseable values are handled by the
/// pipeline rather than rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AlarmQuery {
    pub severity: Option<String>,
    pub equipment_id: Option<String>,
    pub production_step: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub batch_id: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Query parameters of `GET /api/batches`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct BatchQuery {
    pub execution_status: Option<String>,
    pub batch_number: Option<String>,
    pub production_order_number: Option<String>,
    pub recipe_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Where a response body came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Upstream,
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Upstream => "upstream",
            DataSource::Fallback => "fallback",
        }
    }
}

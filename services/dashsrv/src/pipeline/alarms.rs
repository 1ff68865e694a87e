//! Alarm table pipeline

use tracing::debug;

use dash_model::{Alarm, AlarmsResponse};

use crate::api::models::AlarmQuery;
use crate::config::PaginationConfig;
use crate::error::Result;
use crate::fallback;
use crate::filter::{constraint, parse_day, AlarmCriteria};
use crate::paginate::{paginate, PageRequest};
use crate::remap::remap_alarm;
use crate::upstream::{upstream_step_number, AlarmUpstreamQuery, UpstreamSource};

use super::{or_fallback, Served};

/// Filters the backend understands: severity, step number and start date
///
/// The backend only accepts a plain `YYYY-MM-DD` start date, so timestamps
/// are cut down to their day.
pub fn upstream_query(query: &AlarmQuery, criteria: &AlarmCriteria) -> AlarmUpstreamQuery {
    AlarmUpstreamQuery {
        severity: criteria.severity.value(),
        production_step: constraint(query.production_step.as_deref()).and_then(upstream_step_number),
        start_date: constraint(query.start_date.as_deref())
            .and_then(parse_day)
            .map(|day| day.format("%Y-%m-%d").to_string()),
    }
}

pub async fn run(
    upstream: &dyn UpstreamSource,
    query: &AlarmQuery,
    pagination: &PaginationConfig,
) -> Result<AlarmsResponse> {
    let criteria = AlarmCriteria::from_query(query);
    let request = PageRequest::from_raw(query.page.as_deref(), query.limit.as_deref(), pagination);

    let records = upstream.fetch_alarms(&upstream_query(query, &criteria)).await?;
    let fetched = records.len();

    // upstream order is kept
    let alarms: Vec<Alarm> = records
        .iter()
        .map(remap_alarm)
        .filter(|alarm| criteria.matches(alarm))
        .collect();
    debug!(fetched, matched = alarms.len(), "Filtered alarms");

    Ok(paginate(alarms, request).into())
}

pub async fn serve(
    upstream: &dyn UpstreamSource,
    query: &AlarmQuery,
    pagination: &PaginationConfig,
) -> Served<AlarmsResponse> {
    or_fallback("alarms", run(upstream, query, pagination).await, fallback::fallback_alarms)
}

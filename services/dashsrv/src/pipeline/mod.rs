//! Fetch → remap → filter → sort → paginate
//!
//! The `run` functions propagate upstream errors; the `serve` functions are
//! what the HTTP layer calls and substitute fallback data instead.

pub mod alarms;
pub mod batches;

use tracing::warn;

use dash_model::{AlarmStats, BatchStats};
use errors::DashErrorTrait;

use crate::api::models::DataSource;
use crate::error::Result;
use crate::fallback;
use crate::stats;
use crate::upstream::{AlarmUpstreamQuery, UpstreamSource};

/// A response body and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Served<T> {
    pub body: T,
    pub source: DataSource,
}

impl<T> Served<T> {
    pub fn upstream(body: T) -> Self {
        Self {
            body,
            source: DataSource::Upstream,
        }
    }

    pub fn fallback(body: T) -> Self {
        Self {
            body,
            source: DataSource::Fallback,
        }
    }
}

/// Keep a live result, or log the failure and substitute `fallback`
///
/// Any error is absorbed here; callers always get a body.
pub(crate) fn or_fallback<T>(
    endpoint: &str,
    result: Result<T>,
    fallback: impl FnOnce() -> T,
) -> Served<T> {
    match result {
        Ok(body) => Served::upstream(body),
        Err(e) => {
            warn!(
                endpoint,
                code = e.error_code(),
                retryable = e.is_retryable(),
                "Upstream failed, serving fallback data: {}",
                e
            );
            Served::fallback(fallback())
        },
    }
}

pub async fn run_alarm_stats(upstream: &dyn UpstreamSource) -> Result<AlarmStats> {
    let alarms = upstream.fetch_alarms(&AlarmUpstreamQuery::default()).await?;
    Ok(stats::alarm_stats(&alarms))
}

pub async fn run_batch_stats(upstream: &dyn UpstreamSource) -> Result<BatchStats> {
    let batches = upstream.fetch_batches().await?;
    Ok(stats::batch_stats(&batches))
}

pub async fn serve_alarm_stats(upstream: &dyn UpstreamSource) -> Served<AlarmStats> {
    or_fallback("alarm-stats", run_alarm_stats(upstream).await, fallback::zero_alarm_stats)
}

pub async fn serve_batch_stats(upstream: &dyn UpstreamSource) -> Served<BatchStats> {
    or_fallback("batch-stats", run_batch_stats(upstream).await, fallback::zero_batch_stats)
}

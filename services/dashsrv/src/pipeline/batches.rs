//! Batch table pipeline

use std::cmp::Reverse;

use tracing::debug;

use dash_model::{Batch, BatchesResponse};

use crate::api::models::BatchQuery;
use crate::config::PaginationConfig;
use crate::error::Result;
use crate::fallback;
use crate::filter::{parse_timestamp, BatchCriteria};
use crate::paginate::{paginate, PageRequest};
use crate::remap::remap_batch;
use crate::upstream::UpstreamSource;

use super::{or_fallback, Served};

/// Newest actual start first; batches without a usable start go last
pub fn sort_by_start_desc(batches: &mut [Batch]) {
    batches.sort_by_cached_key(|batch| {
        Reverse(batch.actual_start_time.as_deref().and_then(parse_timestamp))
    });
}

pub async fn run(
    upstream: &dyn UpstreamSource,
    query: &BatchQuery,
    pagination: &PaginationConfig,
) -> Result<BatchesResponse> {
    let criteria = BatchCriteria::from_query(query);
    let request = PageRequest::from_raw(query.page.as_deref(), query.limit.as_deref(), pagination);

    let records = upstream.fetch_batches().await?;
    let fetched = records.len();

    let mut batches: Vec<Batch> = records
        .iter()
        .map(remap_batch)
        .filter(|batch| criteria.matches(batch))
        .collect();
    sort_by_start_desc(&mut batches);
    debug!(fetched, matched = batches.len(), "Filtered batches");

    Ok(paginate(batches, request).into())
}

pub async fn serve(
    upstream: &dyn UpstreamSource,
    query: &BatchQuery,
    pagination: &PaginationConfig,
) -> Served<BatchesResponse> {
    or_fallback("batches", run(upstream, query, pagination).await, fallback::fallback_batches)
}

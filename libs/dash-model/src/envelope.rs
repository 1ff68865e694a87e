//! Paginated response envelopes

use serde::{Deserialize, Serialize};

use crate::records::{Alarm, Batch};

/// Number of pages needed for `total` items at `limit` per page
///
/// Raw ceiling: zero items means zero pages.
pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 {
        0
    } else {
        total.div_ceil(limit)
    }
}

/// One page of a filtered collection, independent of the wire shape
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// A page holding exactly one record
    pub fn single(item: T) -> Self {
        Self {
            items: vec![item],
            total: 1,
            page: 1,
            total_pages: 1,
        }
    }
}

/// `GET /api/alarms` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AlarmsResponse {
    pub alarms: Vec<Alarm>,
    pub total: usize,
    pub page: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

/// `GET /api/batches` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BatchesResponse {
    pub batches: Vec<Batch>,
    pub total: usize,
    pub page: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

impl From<Page<Alarm>> for AlarmsResponse {
    fn from(page: Page<Alarm>) -> Self {
        Self {
            alarms: page.items,
            total: page.total,
            page: page.page,
            total_pages: page.total_pages,
        }
    }
}

impl From<Page<Batch>> for BatchesResponse {
    fn from(page: Page<Batch>) -> Self {
        Self {
            batches: page.items,
            total: page.total,
            page: page.page,
            total_pages: page.total_pages,
        }
    }
}

//! Page slicing of filtered collections

use tracing::debug;

use dash_model::{total_pages, Page};

use crate::config::PaginationConfig;

pub const DEFAULT_PAGE: usize = 1;

/// Validated page/limit pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Resolve raw query values
    ///
    /// Missing, non-numeric or zero values use the defaults; `limit` is
    /// capped at `max_limit`.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>, config: &PaginationConfig) -> Self {
        let page = parse_positive(page, "page").unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive(limit, "limit")
            .unwrap_or(config.default_limit)
            .min(config.max_limit);
        Self { page, limit }
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_positive(raw: Option<&str>, name: &str) -> Option<usize> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => {
            debug!("Ignoring invalid {} value '{}'", name, raw);
            None
        },
        Ok(value) => Some(value),
    }
}

/// Cut one page out of the filtered set
///
/// `total` counts the whole set; a page past the end is empty but still
/// echoes the requested number.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len();
    let items = items
        .into_iter()
        .skip(request.offset())
        .take(request.limit)
        .collect();
    Page {
        items,
        total,
        page: request.page,
        total_pages: total_pages(total, request.limit),
    }
}

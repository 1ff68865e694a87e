//! Page-number window for pagination controls

/// Entry in the pagination control row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

const MAX_VISIBLE: usize = 5;

/// Page buttons to render for `current` out of `total_pages`
///
/// At most five consecutive pages around `current`, plus the first and last
/// page with an ellipsis where pages are skipped. Nothing when there is only
/// one page.
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageItem> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);

    let mut start = current.saturating_sub(2).max(1);
    let end = (start + MAX_VISIBLE - 1).min(total_pages);
    if end == total_pages {
        start = end.saturating_sub(MAX_VISIBLE - 1).max(1);
    }

    let mut items = Vec::with_capacity(MAX_VISIBLE + 4);
    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total_pages {
        if end < total_pages - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total_pages));
    }
    items
}

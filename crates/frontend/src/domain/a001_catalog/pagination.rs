//! Page arithmetic for the product grid. Pages are 1-based.

/// Number of pages for `item_count` items.
///
/// Returns 0 for an empty list: pagination controls are not rendered at all
/// rather than showing "page 1 of 0".
pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    if item_count == 0 || page_size == 0 {
        return 0;
    }
    item_count.div_ceil(page_size)
}

/// Items of `page` (1-based), clamped to the slice bounds. Out-of-range pages
/// give an empty slice, never a panic.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Up to `max_visible` page numbers centred on `current_page`, shifted to
/// stay full width near either edge.
pub fn visible_page_window(current_page: usize, total_pages: usize, max_visible: usize) -> Vec<usize> {
    if total_pages == 0 || max_visible == 0 {
        return Vec::new();
    }
    let mut start = current_page.saturating_sub(max_visible / 2).max(1);
    let end = total_pages.min(start + max_visible - 1);
    if end.saturating_sub(start) < max_visible - 1 {
        start = end.saturating_sub(max_visible - 1).max(1);
    }
    (start..=end).collect()
}

/// Current page of the filtered view.
///
/// Invariant: `1 <= current_page`; the upper bound is enforced by
/// `go_to_page` against the page count of the moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    items_per_page: usize,
}

impl PageState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Move to `page`. Rejected (returns false) when the page is outside
    /// `1..=total_pages` or already current.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page < 1 || page > total_pages || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }
}

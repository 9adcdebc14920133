//! Compact page-number sequences for pagination controls.
//!
//! Shows the first page, the last page and a window of ±[`WINDOW_RADIUS`]
//! pages around the current one. Every gap collapses to one ellipsis,
//! including a gap of a single page: `(1, 5)` gives `1 2 3 … 5`, not
//! `1 2 3 4 5`.

use std::fmt;

/// Pages shown on each side of the current page.
pub const WINDOW_RADIUS: usize = 2;

/// One slot in a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLink {
    /// A clickable 1-based page number.
    Page(usize),
    /// One or more hidden pages.
    Ellipsis,
}

impl fmt::Display for PageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{}", n),
            Self::Ellipsis => f.write_str("…"),
        }
    }
}

/// Build the page sequence for `current` out of `total_pages`.
///
/// `current` is not required to be in range; the window is clamped to
/// `[1, total_pages]`, so the result is always increasing, begins with 1
/// and ends with `total_pages`. Zero pages yield an empty sequence.
pub fn build_page_index(current: usize, total_pages: usize) -> Vec<PageLink> {
    if total_pages == 0 {
        return Vec::new();
    }

    let window_start = current.saturating_sub(WINDOW_RADIUS).max(1);
    let window_end = current.saturating_add(WINDOW_RADIUS).min(total_pages);

    let mut pages = vec![1];
    if window_start <= window_end {
        pages.extend(window_start..=window_end);
    }
    pages.push(total_pages);
    pages.sort_unstable();
    pages.dedup();

    let mut links = Vec::with_capacity(pages.len() * 2);
    let mut previous: Option<usize> = None;
    for page in pages {
        if previous.is_some_and(|p| page > p + 1) {
            links.push(PageLink::Ellipsis);
        }
        links.push(PageLink::Page(page));
        previous = Some(page);
    }
    links
}

/// Target for a "previous" control, or `None` on the first page.
pub fn previous_page(current: usize, total_pages: usize) -> Option<usize> {
    if total_pages == 0 || current <= 1 {
        return None;
    }
    Some(current.min(total_pages.saturating_add(1)) - 1)
}

/// Target for a "next" control, or `None` on the last page.
pub fn next_page(current: usize, total_pages: usize) -> Option<usize> {
    if current >= total_pages {
        return None;
    }
    Some(current + 1)
}

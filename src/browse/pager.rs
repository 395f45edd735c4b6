//! Compact page window for pagination controls

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry in a pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLabel {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{}", n),
            Self::Ellipsis => write!(f, "…"),
        }
    }
}

/// Labels to show for page `current` of `total`
///
/// Always shows the first and last page and the neighbors of `current`,
/// collapsing each gap into one ellipsis. Returns nothing when there is at
/// most one page.
///
/// # Examples
///
/// ```
/// use gourmet::browse::{page_window, PageLabel::{Ellipsis, Page}};
///
/// assert!(page_window(1, 1).is_empty());
/// assert_eq!(
///     page_window(5, 10),
///     vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
/// );
/// ```
pub fn page_window(current: u32, total: u32) -> Vec<PageLabel> {
    if total <= 1 {
        return Vec::new();
    }

    let mut labels = vec![PageLabel::Page(1)];

    if current > 3 {
        labels.push(PageLabel::Ellipsis);
    }

    let start = current.saturating_sub(1).max(2);
    let end = current.saturating_add(1).min(total - 1);
    for n in start..=end {
        if !labels.contains(&PageLabel::Page(n)) {
            labels.push(PageLabel::Page(n));
        }
    }

    if current.saturating_add(2) < total {
        labels.push(PageLabel::Ellipsis);
    }

    if !labels.contains(&PageLabel::Page(total)) {
        labels.push(PageLabel::Page(total));
    }

    labels
}

/// Pages needed for `count` items at `page_size` per page, at least 1
///
/// A `page_size` of zero is treated as one.
pub fn page_count(count: usize, page_size: usize) -> u32 {
    let page_size = page_size.max(1);
    let pages = ((count + page_size - 1) / page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Index of the first item on 1-indexed `page`
pub fn page_offset(page: u32, page_size: usize) -> usize {
    (page.saturating_sub(1) as usize).saturating_mul(page_size.max(1))
}

/// Whether a "previous page" control is usable
pub fn has_prev(current: u32) -> bool {
    current > 1
}

/// Whether a "next page" control is usable
pub fn has_next(current: u32, total: u32) -> bool {
    current < total
}

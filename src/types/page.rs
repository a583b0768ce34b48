//! Page results and pagination metadata.

use serde::{Deserialize, Serialize};

/// One page of a filtered, sorted collection.
///
/// Serialized flat, the way list endpoints answer:
/// `{"items": [...], "totalItems": 12, "totalPages": 2, "currentPage": 1, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Pagination information.
    #[serde(flatten)]
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// Creates a page from items and metadata.
    pub fn new(items: Vec<T>, info: PageInfo) -> Self {
        Self { items, info }
    }

    /// Creates an empty page for an empty collection.
    pub fn empty(current_page: u32) -> Self {
        Self {
            items: Vec::new(),
            info: PageInfo::new(0, 1, current_page),
        }
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        self.info.has_next_page
    }

    /// Returns `true` if an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.info.has_previous_page
    }

    /// Returns the numbered links for a pagination control.
    pub fn window(&self) -> Vec<Option<u32>> {
        page_window(self.info.total_pages, self.info.current_page)
    }

    /// Maps every item, keeping the metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty(1)
    }
}

/// Pagination metadata for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Items matching the search and filter across all pages.
    pub total_items: u64,
    /// `ceil(total_items / page_size)`; 0 for an empty collection.
    pub total_pages: u32,
    /// The page that was requested.
    pub current_page: u32,
    /// `current_page < total_pages`.
    pub has_next_page: bool,
    /// `current_page > 1`.
    pub has_previous_page: bool,
}

impl PageInfo {
    /// Computes the metadata for `total_items` split into pages of `page_size`.
    pub fn new(total_items: u64, page_size: u32, current_page: u32) -> Self {
        let page_size = u64::from(page_size.max(1));
        let total_pages = u32::try_from(total_items.div_ceil(page_size)).unwrap_or(u32::MAX);
        Self {
            total_items,
            total_pages,
            current_page,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }

    /// Returns `true` if the requested page lies past the last page.
    pub fn is_out_of_range(&self) -> bool {
        self.current_page > self.total_pages.max(1)
    }

    /// The nearest page that exists: `current_page` clamped to `[1, total_pages]`.
    pub fn clamped_page(&self) -> u32 {
        self.current_page.clamp(1, self.total_pages.max(1))
    }
}

/// Page numbers to render in a pagination control.
///
/// Always shows the first and last page and two pages on each side of the
/// current one; `None` marks a gap rendered as an ellipsis.
///
/// ```rust
/// use shopdesk::types::page_window;
///
/// assert_eq!(
///     page_window(10, 5),
///     vec![Some(1), None, Some(3), Some(4), Some(5), Some(6), Some(7), None, Some(10)]
/// );
/// assert_eq!(page_window(3, 1), vec![Some(1), Some(2), Some(3)]);
/// assert!(page_window(0, 1).is_empty());
/// ```
pub fn page_window(total_pages: u32, current_page: u32) -> Vec<Option<u32>> {
    const EDGE: u32 = 1;
    const AROUND: u32 = 2;

    if total_pages == 0 {
        return Vec::new();
    }
    let current = current_page.clamp(1, total_pages);

    let mut pages = Vec::new();
    let left_end = (1 + EDGE).min(total_pages + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current.saturating_sub(AROUND));
    let mid_end = (current + AROUND + 1).min(total_pages + 1);
    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(total_pages.saturating_sub(EDGE) + 1);
    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=total_pages).map(Some));

    pages
}

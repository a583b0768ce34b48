//! What a list view renders.

use crate::types::{Page, QueryParams};

/// Snapshot of a list view, published on every change.
///
/// `query` is always the most recently issued query, even while its page is
/// still loading; `page` is the last page that was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    /// The query the view shows controls for.
    pub query: QueryParams,
    /// The last applied page, `None` before the first fetch completes.
    pub page: Option<Page<T>>,
    /// A fetch for `query` is in flight.
    pub loading: bool,
    /// Notification text of the last failed fetch.
    pub error: Option<String>,
    /// Generation of the most recently issued fetch.
    pub generation: u64,
}

impl<T> ListState<T> {
    pub(crate) fn new(query: QueryParams) -> Self {
        Self {
            query,
            page: None,
            loading: false,
            error: None,
            generation: 0,
        }
    }

    /// Rows of the applied page.
    pub fn items(&self) -> &[T] {
        self.page.as_ref().map(|page| page.items.as_slice()).unwrap_or(&[])
    }

    /// Total pages of the applied page, 0 before the first fetch.
    pub fn total_pages(&self) -> u32 {
        self.page.as_ref().map_or(0, |page| page.info.total_pages)
    }

    /// Numbered links for the pagination control.
    pub fn page_window(&self) -> Vec<Option<u32>> {
        self.page.as_ref().map(Page::window).unwrap_or_default()
    }

    /// Returns `true` when a later page can be requested.
    pub fn can_go_next(&self) -> bool {
        self.page.as_ref().is_some_and(Page::has_next)
    }

    /// Returns `true` when an earlier page can be requested.
    pub fn can_go_previous(&self) -> bool {
        self.page.as_ref().is_some_and(Page::has_previous)
    }
}

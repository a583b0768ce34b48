//! The query parameter model behind every list view.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::RecordStatus;
use crate::Error;

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, smallest first).
    #[default]
    Asc,
    /// Descending order (Z-A, largest first).
    Desc,
}

impl SortDirection {
    /// Returns `true` if this is ascending order.
    pub fn is_ascending(&self) -> bool {
        matches!(self, SortDirection::Asc)
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Returns the string representation for API queries.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(Error::invalid_argument(format!(
                "unknown sort direction: {:?}",
                other
            ))),
        }
    }
}

/// Values of a status filter select that mean "no filter".
const ALL_SENTINELS: &[&str] = &["", "all", "todos", "todas"];

/// Parses the value of a status filter select.
///
/// The "all" sentinels clear the filter; anything else must be a known
/// status spelling.
///
/// ```rust
/// use shopdesk::{RecordStatus, types::parse_status_filter};
///
/// assert_eq!(parse_status_filter("todos").unwrap(), None);
/// assert_eq!(parse_status_filter("Inativo").unwrap(), Some(RecordStatus::Inactive));
/// assert!(parse_status_filter("archived").is_err());
/// ```
pub fn parse_status_filter(value: &str) -> Result<Option<RecordStatus>, Error> {
    let trimmed = value.trim();
    if ALL_SENTINELS
        .iter()
        .any(|sentinel| trimmed.eq_ignore_ascii_case(sentinel))
    {
        return Ok(None);
    }
    trimmed.parse::<RecordStatus>().map(Some)
}

/// What page of what, filtered and sorted how.
///
/// `QueryParams` is a plain value: equal parameters always describe the same
/// request, which makes it the cache key for fetched pages. The `set_*`
/// methods carry the list semantics (changing the search, sort, page size
/// or filter sends the view back to page 1); the `with_*` methods are plain
/// builders.
///
/// ## Example
///
/// ```rust
/// use shopdesk::{QueryParams, SortDirection};
///
/// let mut query = QueryParams::new().with_page(3);
/// query.set_sort("descricao");
/// assert_eq!(query.page, 1);
/// assert_eq!(query.sort_direction, SortDirection::Asc);
///
/// query.set_sort("descricao");
/// assert_eq!(query.sort_direction, SortDirection::Desc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Free-text search; empty means no filter.
    pub search_text: String,
    /// Column to sort by.
    pub sort_field: Option<String>,
    /// Direction applied when `sort_field` is set.
    pub sort_direction: SortDirection,
    /// Only records with this status.
    pub status_filter: Option<RecordStatus>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
            search_text: String::new(),
            sort_field: None,
            sort_direction: SortDirection::Asc,
            status_filter: None,
        }
    }
}

impl QueryParams {
    /// Page size used when a view mounts without configuration.
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Creates parameters for the first page with default size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page. Pages start at 1.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size. Sizes start at 1.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the search text.
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Sets the sort column and direction.
    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = Some(field.into());
        self.sort_direction = direction;
        self
    }

    /// Sets the status filter.
    #[must_use]
    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status_filter = Some(status);
        self
    }

    /// Replaces the search text and returns to page 1.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    /// Sorts by `field`: a new column starts ascending, the current column
    /// flips direction. Returns to page 1.
    pub fn set_sort(&mut self, field: impl Into<String>) {
        let field = field.into();
        if self.sort_field.as_deref() == Some(field.as_str()) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = Some(field);
            self.sort_direction = SortDirection::Asc;
        }
        self.page = 1;
    }

    /// Removes sorting and returns to page 1.
    pub fn clear_sort(&mut self) {
        self.sort_field = None;
        self.sort_direction = SortDirection::Asc;
        self.page = 1;
    }

    /// Moves to `page` without checking it against the total.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Sets or clears the status filter and returns to page 1.
    pub fn set_status_filter(&mut self, status: Option<RecordStatus>) {
        self.status_filter = status;
        self.page = 1;
    }

    /// Returns the trimmed search text, or `None` when there is nothing to match.
    pub fn search(&self) -> Option<&str> {
        let trimmed = self.search_text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Index of the first item of the requested page in the filtered collection.
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1).saturating_mul(self.page_size.max(1) as usize)
    }

    /// Encodes the parameters as URL query pairs.
    ///
    /// Unset optional parameters are omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(search) = self.search() {
            pairs.push(("search", search.to_string()));
        }
        if let Some(ref field) = self.sort_field {
            pairs.push(("sortField", field.clone()));
            pairs.push(("sortDirection", self.sort_direction.as_str().to_string()));
        }
        if let Some(status) = self.status_filter {
            pairs.push(("status", status.label().to_string()));
        }
        pairs
    }
}

//! List view configuration.

use crate::types::{QueryParams, RecordStatus, SortDirection};

/// Page sizes offered by the page size select.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [u32; 5] = [10, 20, 30, 40, 50];

/// How a list view starts and how it treats pages past the end.
///
/// ## Example
///
/// ```rust
/// use shopdesk::{ListConfig, SortDirection};
///
/// let config = ListConfig::builder()
///     .default_page_size(20)
///     .initial_sort(("descricao".to_string(), SortDirection::Asc))
///     .build();
///
/// let query = config.initial_query();
/// assert_eq!(query.page_size, 20);
/// assert_eq!(query.sort_field.as_deref(), Some("descricao"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct ListConfig {
    /// Page size when the view mounts.
    #[builder(default = QueryParams::DEFAULT_PAGE_SIZE)]
    pub default_page_size: u32,

    /// Sizes the user may pick from.
    #[builder(default = DEFAULT_PAGE_SIZE_OPTIONS.to_vec())]
    pub page_size_options: Vec<u32>,

    /// Move a page past the end back to the last page and fetch again.
    ///
    /// When off, the view keeps the requested page and shows an empty table.
    #[builder(default = true)]
    pub clamp_out_of_range_pages: bool,

    /// Sort applied when the view mounts.
    pub initial_sort: Option<(String, SortDirection)>,

    /// Status filter applied when the view mounts.
    pub initial_status_filter: Option<RecordStatus>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ListConfig {
    /// The query a freshly mounted (or reset) view starts with.
    pub fn initial_query(&self) -> QueryParams {
        let mut query = QueryParams::new().with_page_size(self.default_page_size);
        if let Some((ref field, direction)) = self.initial_sort {
            query = query.with_sort(field.clone(), direction);
        }
        if let Some(status) = self.initial_status_filter {
            query = query.with_status(status);
        }
        query
    }

    /// Returns `true` if `page_size` is one of the offered sizes.
    ///
    /// An empty option list accepts any size.
    pub fn allows_page_size(&self, page_size: u32) -> bool {
        page_size > 0
            && (self.page_size_options.is_empty() || self.page_size_options.contains(&page_size))
    }
}

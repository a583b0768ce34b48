//! In-memory search, filter, sort and page slicing.
//!
//! This is the reference behavior every list honors: the in-memory transport
//! runs it directly and the REST backend is expected to answer the same
//! query with the same page.
//!
//! 1. Start from the collection in insertion order.
//! 2. Keep records where the trimmed search text is a case-insensitive
//!    substring of any searchable field.
//! 3. Keep records whose status equals the status filter.
//! 4. Stable-sort by the sort field, if it is sortable.
//! 5. Slice out the requested page. Pages past the end are empty.

use std::cmp::Ordering;

use crate::types::{Page, PageInfo, QueryParams, Record, SortDirection};

/// Returns the requested page of `records`.
///
/// ```rust
/// # use shopdesk::{Record, RecordStatus, QueryParams, paginate::paginate};
/// # use serde::{Deserialize, Serialize};
/// # #[derive(Debug, Clone, Serialize, Deserialize, Record)]
/// # #[record(resource = "itens")]
/// # struct Item { #[record(id, sort)] id: u64 }
/// let items: Vec<Item> = (1..=12).map(|id| Item { id }).collect();
///
/// let page = paginate(&items, &QueryParams::new().with_page(2));
/// assert_eq!(page.len(), 2);
/// assert_eq!(page.info.total_pages, 2);
/// assert!(!page.has_next());
/// assert!(page.has_previous());
/// ```
pub fn paginate<T: Record>(records: &[T], query: &QueryParams) -> Page<T> {
    let filtered = filter_and_sort(records, query);
    let info = PageInfo::new(filtered.len() as u64, query.page_size, query.page);

    let page_size = query.page_size.max(1) as usize;
    let items = filtered
        .into_iter()
        .skip(query.offset())
        .take(page_size)
        .cloned()
        .collect();

    Page::new(items, info)
}

/// Applies search, status filter and sort without slicing.
///
/// Returns references into `records`; concatenating every page of
/// [`paginate`] for the same query yields exactly this sequence.
pub fn filter_and_sort<'a, T: Record>(records: &'a [T], query: &QueryParams) -> Vec<&'a T> {
    let search = query.search();
    let mut filtered: Vec<&T> = records
        .iter()
        .filter(|record| search.is_none_or(|needle| record.matches_search(needle)))
        .filter(|record| {
            query
                .status_filter
                .is_none_or(|wanted| record.status() == Some(wanted))
        })
        .collect();

    if let Some(ref field) = query.sort_field {
        if T::is_sortable(field) {
            sort_by_field(&mut filtered, field, query.sort_direction);
        } else {
            tracing::debug!(
                resource = T::RESOURCE,
                field = %field,
                "ignoring sort on unknown field"
            );
        }
    }

    filtered
}

/// Stable-sorts records by `field`.
///
/// Ties keep their input order in both directions.
pub fn sort_by_field<T: Record>(records: &mut [&T], field: &str, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ordering = match (a.sort_key(field), b.sort_key(field)) {
            (Some(a), Some(b)) => a.compare(&b),
            _ => Ordering::Equal,
        };
        if direction.is_ascending() {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

//! Core value types shared by every list.

mod page;
mod query;
mod record;
mod status;

pub use page::{Page, PageInfo, page_window};
pub use query::{QueryParams, SortDirection, parse_status_filter};
pub use record::{IntoSortKey, Record, RecordId, SearchField, SortKey, StatusField};
pub use status::RecordStatus;

//! Configuration types.
//!
//! - [`ListConfig`]: how a list view starts and handles out-of-range pages
//! - [`CacheConfig`]: the per-list page cache
//! - [`RetryConfig`]: retry behavior of the REST transport

mod cache;
mod list;
mod retry;

pub use cache::CacheConfig;
pub use list::{DEFAULT_PAGE_SIZE_OPTIONS, ListConfig};
pub use retry::RetryConfig;

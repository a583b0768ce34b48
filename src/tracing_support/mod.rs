//! Tracing integration for observability.
//!
//! Every list fetch runs inside a `list.fetch` span carrying the resource,
//! the requested page and page size, and the fetch generation. Superseded
//! results are logged at `debug`, failures at `warn`. [`FetchStats`] keeps
//! counters per list.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tracing_subscriber::prelude::*;
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer())
//!     .with(tracing_subscriber::EnvFilter::new("shopdesk=debug"))
//!     .init();
//!
//! controller.set_search_text("visa").await?;
//! // Logs: list.fetch{resource="bandeiras-cartao" page=1 page_size=10 generation=2}: page applied total_items=1
//! ```

mod span;
mod stats;

pub use span::{fetch_span, write_span};
pub use stats::{FetchStats, FetchStatsSnapshot};

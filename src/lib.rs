//! # shopdesk
//!
//! Paginated, searchable, sortable resource lists for the shop back office.
//!
//! Every list screen of the back office (card brands, products, vehicles,
//! service orders, ...) has the same shape: a query made of page, page size,
//! search text, sort and status filter; a fetch that turns the query into a
//! page of records; a table projecting those records into cells and row
//! actions; and a selection deciding which dialog is open. This crate
//! provides each of those pieces once, generic over the record type.
//!
//! ## Quick Start
//!
//! ```rust
//! use shopdesk::prelude::*;
//! use shopdesk::resources::vehicle::{self, Vehicle};
//!
//! # tokio_test::block_on(async {
//! let client = Client::builder().in_memory().build()?;
//! client.seed(vehicle::sample(42))?;
//!
//! let vehicles = client.resource::<Vehicle>().list_controller();
//! let page = vehicles.load().await?;
//! assert_eq!(page.info.total_pages, 5);
//!
//! // Sorting a column starts ascending, clicking it again toggles.
//! vehicles.set_sort("ano").await?;
//! let page = vehicles.set_sort("ano").await?;
//! assert!(page.items.windows(2).all(|w| w[0].ano >= w[1].ano));
//!
//! // Changing the search goes back to the first page.
//! vehicles.set_page(3).await?;
//! let page = vehicles.set_search_text("gol").await?;
//! assert_eq!(page.info.current_page, 1);
//! # Ok::<(), shopdesk::Error>(())
//! # });
//! ```
//!
//! ## Key Concepts
//!
//! - **Last issued wins**: a [`ListController`] applies only the result of
//!   the most recent fetch; older fetches are cancelled or discarded.
//! - **Pure paging**: [`paginate`](paginate::paginate) is the reference
//!   filter, sort and slice that the in-memory transport serves.
//! - **One dialog at a time**: [`Selection`] is a single variant, so a record
//!   can never be viewed and edited at once.
//! - **Silent cancellation**: [`Error::is_silent`] is `true` for cancelled
//!   fetches, which are never shown to the user.
//!
//! ## Features
//!
//! - `rest` (default): REST transport via reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// The derive emits `::shopdesk::` paths, which must resolve inside this crate too.
extern crate self as shopdesk;

// Core modules
pub mod client;
pub mod config;
pub mod error;
pub mod types;

// List machinery
pub mod cache;
pub mod controller;
pub mod forms;
pub mod paginate;
pub mod projection;
pub mod selection;

// Transport layer
pub mod transport;

#[cfg(feature = "rest")]
mod user_agent;

// Feature resources
pub mod resources;

// Testing utilities
pub mod testing;

// Tracing support
pub mod tracing_support;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use client::{Client, ClientBuilder, ResourceClient};
pub use controller::{ListController, ListState};
pub use error::{Error, ErrorCategory, ErrorKind, Result};
pub use selection::{Selection, SelectionContext};
pub use transport::Transport;
pub use types::{
    Page, PageInfo, QueryParams, Record, RecordId, RecordStatus, SortDirection, SortKey,
};

// Derive macro, same name as the trait
pub use shopdesk_derive::Record;

// Re-export config types
pub use config::{CacheConfig, ListConfig, RetryConfig};

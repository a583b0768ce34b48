//! Fetch adapters: where list pages and record writes go.
//!
//! - [`RestTransport`] (via reqwest, feature `rest`): the back-office REST API
//! - [`InMemoryTransport`](crate::testing::InMemoryTransport): an in-process
//!   collection sliced by [`paginate`](crate::paginate::paginate)
//! - [`MockTransport`](crate::testing::MockTransport): scripted responses
//!
//! All of them implement [`ResourceTransport`] and honor a [`CancelSignal`]
//! on `list`, so a superseded fetch stops instead of racing the newer one.
//!
//! ```rust
//! use shopdesk::Transport;
//!
//! let http = Transport::Http;         // REST backend (default)
//! let memory = Transport::InMemory;   // demo datasets, tests
//! assert_ne!(http, memory);
//! ```

mod cancel;
mod traits;

#[cfg(feature = "rest")]
mod rest;

pub use cancel::{CancelHandle, CancelSignal};
pub use traits::{ResourceTransport, Transport, TransportStats};

#[cfg(feature = "rest")]
pub use rest::{RestTransport, RestTransportBuilder};

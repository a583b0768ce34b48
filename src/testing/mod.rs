//! Testing utilities.
//!
//! - [`InMemoryTransport`]: a working transport over an in-memory collection,
//!   with simulated latency, failures and cancellation
//! - [`MockTransport`]: scripted `list` answers with expectation verification
//! - [`fixtures`]: a small record type for tests and examples
//!
//! ## InMemoryTransport vs MockTransport
//!
//! | Feature | InMemoryTransport | MockTransport |
//! |---------|-------------------|---------------|
//! | Real search/sort/paging | ✓ | ✗ |
//! | Expectation verification | ✗ | ✓ |
//! | Simulated latency | ✓ | ✗ |
//! | Best for | Controller and integration tests | Unit tests of callers |

pub mod fixtures;
mod in_memory;
mod mock;

pub use in_memory::InMemoryTransport;
pub use mock::{MockCall, MockTransport};

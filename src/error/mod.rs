//! Error types for list, detail and write operations.
//!
//! Every fallible operation returns [`Error`], which carries an [`ErrorKind`]
//! for matching. Kinds collapse onto four user-facing categories
//! ([`ErrorCategory`]) that decide how a failure is surfaced:
//!
//! | Category     | Surfaced as                                    |
//! |--------------|------------------------------------------------|
//! | `Validation` | per-field messages mapped onto the form        |
//! | `Transport`  | one-line, non-blocking notification            |
//! | `Cancelled`  | nothing (superseded or aborted fetch)          |
//! | `NotFound`   | notification; the detail view closes           |
//!
//! ```rust
//! use shopdesk::{Error, ErrorKind};
//!
//! let err = Error::cancelled();
//! assert!(err.is_silent());
//! assert_eq!(err.kind(), ErrorKind::Cancelled);
//! ```

#[allow(clippy::module_inception)]
mod error;
mod kind;

pub use error::Error;
pub use kind::{ErrorCategory, ErrorKind};

/// A specialized `Result` type for shopdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

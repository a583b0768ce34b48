//! Integration tests for shopdesk.
//!
//! Everything runs in process: in-memory clients for list behaviour and
//! fetch ordering, and a `wiremock` server standing in for the REST backend.
//!
//! # Running Tests
//!
//! ```bash
//! # Run integration tests
//! cargo test --test integration
//!
//! # With log output from the list controllers
//! RUST_LOG=shopdesk=debug cargo test --test integration -- --nocapture
//!
//! # Run a specific test
//! cargo test --test integration test_superseded_fetch_never_applied -- --nocapture
//! ```

mod common;
mod list_tests;
mod ordering_tests;
#[cfg(feature = "rest")]
mod rest_tests;
mod screen_tests;

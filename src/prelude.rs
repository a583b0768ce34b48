//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy importing:
//!
//! ```rust
//! use shopdesk::prelude::*;
//! ```
//!
//! This provides access to:
//! - Client types
//! - Query and page types
//! - The list controller, table projection and selection
//! - Error types

pub use crate::{
    client::{Client, ClientBuilder, ListRequest, ResourceClient},
    config::{CacheConfig, ListConfig, RetryConfig},
    controller::{ListController, ListState},
    error::{Error, ErrorCategory, ErrorKind, Result},
    forms::{FieldErrors, FieldMap, FormErrors},
    projection::{ActionKind, Cell, Column, RowActions, TableProjection},
    selection::{Selection, SelectionAction, SelectionContext},
    transport::{CancelHandle, CancelSignal, ResourceTransport, Transport},
    types::{Page, PageInfo, QueryParams, RecordId, RecordStatus, SortDirection},
    Record,
};

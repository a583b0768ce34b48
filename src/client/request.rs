//! One-off page fetches.

use std::future::{Future, IntoFuture};
use std::pin::Pin;

use tracing::Instrument;

use super::ResourceClient;
use crate::error::Error;
use crate::tracing_support::fetch_span;
use crate::transport::CancelSignal;
use crate::types::{Page, QueryParams, Record, RecordStatus, SortDirection};

/// A builder for a single page fetch.
///
/// Created by [`ResourceClient::list()`]. Chain the query, then `.await`.
/// Unlike a [`ListController`](crate::controller::ListController), nothing
/// is remembered between requests and out-of-range pages come back empty.
pub struct ListRequest<'a, T: Record> {
    resource: &'a ResourceClient<T>,
    query: QueryParams,
    cancel: CancelSignal,
}

impl<'a, T: Record> ListRequest<'a, T> {
    pub(super) fn new(resource: &'a ResourceClient<T>, query: QueryParams) -> Self {
        Self {
            resource,
            query,
            cancel: CancelSignal::never(),
        }
    }

    /// Requests page `page`, 1-based.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.query.page = page.max(1);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.query.page_size = page_size.max(1);
        self
    }

    /// Filters by free text. Blank text means no filter.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.query.search_text = text.into();
        self
    }

    /// Sorts by `field`.
    ///
    /// Fields the record does not sort on are ignored.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.query.sort_field = Some(field.into());
        self.query.sort_direction = direction;
        self
    }

    /// Only returns records with `status`.
    #[must_use]
    pub fn status(mut self, status: RecordStatus) -> Self {
        self.query.status_filter = Some(status);
        self
    }

    /// Replaces the whole query.
    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Aborts the fetch when `signal` fires.
    #[must_use]
    pub fn cancel_on(mut self, signal: CancelSignal) -> Self {
        self.cancel = signal;
        self
    }

    async fn execute(self) -> Result<Page<T>, Error> {
        let span = fetch_span(T::RESOURCE, &self.query, 0);
        self.resource
            .transport_ref()
            .list(&self.query, self.cancel)
            .instrument(span)
            .await
    }
}

impl<'a, T: Record> IntoFuture for ListRequest<'a, T> {
    type Output = Result<Page<T>, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}

impl<T: Record> std::fmt::Debug for ListRequest<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListRequest")
            .field("resource", &T::RESOURCE)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

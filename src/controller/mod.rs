//! The list controller: query state, re-fetching and write-through.
//!
//! A [`ListController`] owns the [`QueryParams`] of one list view. Every
//! mutator changes the query and fetches the matching page through a
//! [`ResourceTransport`]. Fetches are ordered by issue, not by completion:
//! issuing a new fetch cancels the one in flight, and any result that
//! arrives for an older generation is discarded without touching the
//! visible [`ListState`].
//!
//! ```rust
//! use std::sync::Arc;
//! use shopdesk::controller::ListController;
//! use shopdesk::testing::{InMemoryTransport, fixtures::brands};
//!
//! # tokio_test::block_on(async {
//! let controller = ListController::new(Arc::new(InMemoryTransport::with_records(brands(12))));
//!
//! let page = controller.set_page(2).await.unwrap();
//! assert_eq!(page.len(), 2);
//!
//! let page = controller.set_search_text("Bandeira 1").await.unwrap();
//! assert_eq!(page.info.current_page, 1);
//! assert_eq!(controller.state().query.search(), Some("Bandeira 1"));
//! # });
//! ```

mod state;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::Instrument;

pub use state::ListState;

use crate::cache::{PageCache, WriteEpoch};
use crate::config::{CacheConfig, ListConfig};
use crate::error::{Error, ErrorKind, Result};
use crate::tracing_support::{FetchStats, fetch_span, write_span};
use crate::transport::{CancelHandle, CancelSignal, ResourceTransport, Transport};
use crate::types::{Page, QueryParams, Record, RecordId, RecordStatus, parse_status_filter};

/// Clamp refetches allowed per request before an empty page is accepted.
const MAX_CLAMP_REFETCHES: usize = 2;

// ============================================================================
// Controller
// ============================================================================

/// Drives one list view of records of type `T`.
///
/// Clones share the same state; hand one to each task that needs it.
pub struct ListController<T: Record> {
    inner: Arc<ControllerInner<T>>,
}

impl<T: Record> Clone for ListController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ControllerInner<T: Record> {
    transport: Arc<dyn ResourceTransport<T>>,
    config: ListConfig,
    cache: PageCache<T>,
    shared: Mutex<Shared>,
    state: watch::Sender<ListState<T>>,
    stats: FetchStats,
    closed: AtomicBool,
}

/// Mutable bookkeeping guarded by one lock so issue and apply never interleave.
struct Shared {
    query: QueryParams,
    generation: u64,
    in_flight: Option<CancelHandle>,
}

/// One issued fetch.
struct Ticket {
    generation: u64,
    query: QueryParams,
    signal: CancelSignal,
}

struct Fetched<T> {
    result: Result<Page<T>>,
    latency: Duration,
    cached: bool,
    /// Write epoch when the fetch started.
    epoch: u64,
}

enum Step<T> {
    Done(Page<T>),
    Refetch(Ticket),
}

impl<T: Record> ListController<T> {
    /// Creates a controller with default list and cache configuration.
    ///
    /// Nothing is fetched until the first call to [`load`](Self::load) or a
    /// mutator.
    pub fn new(transport: Arc<dyn ResourceTransport<T>>) -> Self {
        Self::with_config(transport, ListConfig::default(), CacheConfig::default())
    }

    /// Creates a controller with explicit configuration.
    pub fn with_config(
        transport: Arc<dyn ResourceTransport<T>>,
        config: ListConfig,
        cache_config: CacheConfig,
    ) -> Self {
        Self::with_write_epoch(transport, config, cache_config, WriteEpoch::new())
    }

    /// Creates a controller whose page cache follows `epoch`.
    ///
    /// Controllers and resource clients of one resource share an epoch, so
    /// a write made through any of them keeps the others from serving
    /// cached pages from before it.
    pub fn with_write_epoch(
        transport: Arc<dyn ResourceTransport<T>>,
        config: ListConfig,
        cache_config: CacheConfig,
        epoch: WriteEpoch,
    ) -> Self {
        let query = config.initial_query();
        let (state, _) = watch::channel(ListState::new(query.clone()));
        Self {
            inner: Arc::new(ControllerInner {
                transport,
                config,
                cache: PageCache::with_epoch(cache_config, epoch),
                shared: Mutex::new(Shared {
                    query,
                    generation: 0,
                    in_flight: None,
                }),
                state,
                stats: FetchStats::new(),
                closed: AtomicBool::new(false),
            }),
        }
    }

    // ------------------------------------------------------------------------
    // Query mutators
    // ------------------------------------------------------------------------

    /// Fetches the page for the current query, using the cache.
    pub async fn load(&self) -> Result<Page<T>> {
        self.submit(|_| {}, true).await
    }

    /// Fetches the page for the current query from the transport.
    pub async fn refresh(&self) -> Result<Page<T>> {
        self.submit(|_| {}, false).await
    }

    /// Replaces the search text and returns to page 1.
    ///
    /// Empty or whitespace-only text clears the search.
    pub async fn set_search_text(&self, text: impl Into<String>) -> Result<Page<T>> {
        let text = text.into();
        self.submit(move |query| query.set_search_text(text), true)
            .await
    }

    /// Sorts by `field`, or flips the direction if it is already the sort
    /// column. Returns to page 1.
    ///
    /// Fails with `InvalidArgument` for fields the record cannot sort on.
    pub async fn set_sort(&self, field: &str) -> Result<Page<T>> {
        if !T::is_sortable(field) {
            return Err(Error::invalid_argument(format!(
                "{} cannot be sorted by {:?}",
                T::RESOURCE,
                field
            )));
        }
        let field = field.to_string();
        self.submit(move |query| query.set_sort(field), true).await
    }

    /// Removes sorting and returns to page 1.
    pub async fn clear_sort(&self) -> Result<Page<T>> {
        self.submit(QueryParams::clear_sort, true).await
    }

    /// Moves to `page`.
    ///
    /// Pages past the end are clamped to the last page when
    /// [`ListConfig::clamp_out_of_range_pages`] is set.
    pub async fn set_page(&self, page: u32) -> Result<Page<T>> {
        self.submit(move |query| query.set_page(page), true).await
    }

    /// Changes the page size and returns to page 1.
    ///
    /// Fails with `InvalidArgument` for sizes not offered by the config.
    pub async fn set_page_size(&self, page_size: u32) -> Result<Page<T>> {
        if !self.inner.config.allows_page_size(page_size) {
            return Err(Error::invalid_argument(format!(
                "page size {} is not one of {:?}",
                page_size, self.inner.config.page_size_options
            )));
        }
        self.submit(move |query| query.set_page_size(page_size), true)
            .await
    }

    /// Applies the value of a status filter select and returns to page 1.
    ///
    /// `"all"`, `"todos"` and `""` clear the filter.
    pub async fn set_status_filter(&self, value: &str) -> Result<Page<T>> {
        let status = parse_status_filter(value)?;
        self.filter_by_status(status).await
    }

    /// Sets or clears the status filter and returns to page 1.
    pub async fn filter_by_status(&self, status: Option<RecordStatus>) -> Result<Page<T>> {
        self.submit(move |query| query.set_status_filter(status), true)
            .await
    }

    /// Moves one page forward.
    ///
    /// On the last page this returns the current page without fetching.
    pub async fn next_page(&self) -> Result<Page<T>> {
        match self.applied_page() {
            Some(page) if page.has_next() => self.set_page(page.info.current_page + 1).await,
            Some(page) => Ok(page),
            None => self.load().await,
        }
    }

    /// Moves one page back.
    ///
    /// On the first page this returns the current page without fetching.
    pub async fn previous_page(&self) -> Result<Page<T>> {
        match self.applied_page() {
            Some(page) if page.has_previous() => {
                self.set_page(page.info.current_page - 1).await
            },
            Some(page) => Ok(page),
            None => self.load().await,
        }
    }

    /// Restores the query a freshly mounted view starts with.
    pub async fn reset(&self) -> Result<Page<T>> {
        let initial = self.inner.config.initial_query();
        self.submit(move |query| *query = initial, true).await
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    /// Fetches one record for a detail view.
    pub async fn get(&self, id: &RecordId) -> Result<T> {
        self.ensure_open()?;
        self.inner.transport.get(id).await
    }

    /// Creates a record, then reloads the list.
    pub async fn create(&self, record: T) -> Result<T> {
        self.ensure_open()?;
        let created = self
            .inner
            .transport
            .create(record)
            .instrument(write_span(T::RESOURCE, "create", None))
            .await?;
        self.after_write().await;
        Ok(created)
    }

    /// Replaces a record, then reloads the list.
    pub async fn update(&self, id: &RecordId, record: T) -> Result<T> {
        self.ensure_open()?;
        let updated = self
            .inner
            .transport
            .update(id, record)
            .instrument(write_span(T::RESOURCE, "update", Some(id.as_str())))
            .await?;
        self.after_write().await;
        Ok(updated)
    }

    /// Deletes a record, then reloads the list.
    pub async fn delete(&self, id: &RecordId) -> Result<()> {
        self.ensure_open()?;
        self.inner
            .transport
            .delete(id)
            .instrument(write_span(T::RESOURCE, "delete", Some(id.as_str())))
            .await?;
        self.after_write().await;
        Ok(())
    }

    /// Marks a record active, then reloads the list.
    pub async fn activate(&self, id: &RecordId) -> Result<T> {
        self.set_record_status(id, RecordStatus::Active).await
    }

    /// Marks a record inactive, then reloads the list.
    pub async fn deactivate(&self, id: &RecordId) -> Result<T> {
        self.set_record_status(id, RecordStatus::Inactive).await
    }

    /// Flips the status of `record`.
    ///
    /// Fails with `InvalidArgument` for records without a status.
    pub async fn toggle_status(&self, record: &T) -> Result<T> {
        let status = record.status().ok_or_else(|| {
            Error::invalid_argument(format!("{} records have no status", T::RESOURCE))
        })?;
        self.set_record_status(&record.id(), status.toggled()).await
    }

    /// Sets the status of a record, then reloads the list.
    pub async fn set_record_status(&self, id: &RecordId, status: RecordStatus) -> Result<T> {
        self.ensure_open()?;
        let operation = if status.is_active() {
            "activate"
        } else {
            "deactivate"
        };
        let record = self
            .inner
            .transport
            .set_status(id, status)
            .instrument(write_span(T::RESOURCE, operation, Some(id.as_str())))
            .await?;
        self.after_write().await;
        Ok(record)
    }

    // ------------------------------------------------------------------------
    // Accessors and lifecycle
    // ------------------------------------------------------------------------

    /// Returns a snapshot of the visible state.
    pub fn state(&self) -> ListState<T> {
        self.inner.state.borrow().clone()
    }

    /// Returns a receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.inner.state.subscribe()
    }

    /// Streams the visible state, starting with the current one.
    ///
    /// Changes made while the consumer is busy are coalesced, so the next
    /// item is always the latest state. The stream ends once every clone of
    /// the controller is dropped.
    pub fn states(&self) -> impl Stream<Item = ListState<T>> + Send + 'static {
        let receiver = self.inner.state.subscribe();
        futures::stream::unfold((receiver, true), |(mut receiver, first)| async move {
            if !first && receiver.changed().await.is_err() {
                return None;
            }
            let state = receiver.borrow_and_update().clone();
            Some((state, (receiver, false)))
        })
    }

    /// Returns the most recently issued query.
    pub fn query(&self) -> QueryParams {
        self.inner.shared.lock().query.clone()
    }

    /// Returns the fetch counters.
    pub fn stats(&self) -> &FetchStats {
        &self.inner.stats
    }

    /// Returns the list configuration.
    pub fn config(&self) -> &ListConfig {
        &self.inner.config
    }

    /// Returns the kind of transport behind this list.
    pub fn transport_type(&self) -> Transport {
        self.inner.transport.transport_type()
    }

    /// Returns `true` once [`close`](Self::close) was called.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Unmounts the view.
    ///
    /// Cancels the fetch in flight, discards the applied page and the cache.
    /// Later calls fail with `Cancelled`. Idempotent.
    pub fn close(&self) {
        let mut shared = self.inner.shared.lock();
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        shared.generation += 1;
        if let Some(handle) = shared.in_flight.take() {
            handle.cancel();
        }
        let generation = shared.generation;
        self.inner.cache.clear();
        self.inner.state.send_modify(|state| {
            state.page = None;
            state.loading = false;
            state.error = None;
            state.generation = generation;
        });
        tracing::debug!(resource = T::RESOURCE, "list view closed");
    }

    // ------------------------------------------------------------------------
    // Fetch pipeline
    // ------------------------------------------------------------------------

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(closed_error())
        } else {
            Ok(())
        }
    }

    fn applied_page(&self) -> Option<Page<T>> {
        self.inner.state.borrow().page.clone()
    }

    async fn submit<F>(&self, mutate: F, use_cache: bool) -> Result<Page<T>>
    where
        F: FnOnce(&mut QueryParams),
    {
        let ticket = self.issue(mutate)?;
        self.execute(ticket, use_cache).await
    }

    /// Applies `mutate` and starts a new generation, cancelling the previous one.
    fn issue<F>(&self, mutate: F) -> Result<Ticket>
    where
        F: FnOnce(&mut QueryParams),
    {
        let mut shared = self.inner.shared.lock();
        if self.is_closed() {
            return Err(closed_error());
        }
        mutate(&mut shared.query);
        Ok(self.start_generation(&mut shared))
    }

    fn start_generation(&self, shared: &mut Shared) -> Ticket {
        shared.generation += 1;
        let (handle, signal) = CancelHandle::new();
        if let Some(previous) = shared.in_flight.replace(handle) {
            previous.cancel();
        }

        let generation = shared.generation;
        let query = shared.query.clone();
        self.inner.state.send_modify(|state| {
            state.query = query.clone();
            state.loading = true;
            state.generation = generation;
        });

        Ticket {
            generation,
            query,
            signal,
        }
    }

    async fn execute(&self, mut ticket: Ticket, use_cache: bool) -> Result<Page<T>> {
        let mut clamps_left = MAX_CLAMP_REFETCHES;
        loop {
            let span = fetch_span(T::RESOURCE, &ticket.query, ticket.generation);
            let fetched = self.fetch(&ticket, use_cache).instrument(span).await;
            match self.apply(ticket, fetched, clamps_left > 0)? {
                Step::Done(page) => return Ok(page),
                Step::Refetch(next) => {
                    clamps_left -= 1;
                    ticket = next;
                },
            }
        }
    }

    async fn fetch(&self, ticket: &Ticket, use_cache: bool) -> Fetched<T> {
        self.inner.stats.record_issued();
        let epoch = self.inner.cache.epoch().current();

        if use_cache {
            if let Some(page) = self.inner.cache.get(&ticket.query) {
                self.inner.stats.record_cache_hit();
                tracing::debug!("served from cache");
                return Fetched {
                    result: Ok(page),
                    latency: Duration::ZERO,
                    cached: true,
                    epoch,
                };
            }
        }

        let started = Instant::now();
        let result = self
            .inner
            .transport
            .list(&ticket.query, ticket.signal.clone())
            .await;
        Fetched {
            result,
            latency: started.elapsed(),
            cached: false,
            epoch,
        }
    }

    /// Publishes a result if it belongs to the latest generation.
    fn apply(&self, ticket: Ticket, fetched: Fetched<T>, allow_clamp: bool) -> Result<Step<T>> {
        let mut shared = self.inner.shared.lock();
        if shared.generation != ticket.generation {
            drop(shared);
            self.inner.stats.record_superseded();
            tracing::debug!(
                resource = T::RESOURCE,
                generation = ticket.generation,
                page = ticket.query.page,
                "discarding superseded result"
            );
            return Err(Error::superseded());
        }

        match fetched.result {
            Ok(page) => {
                if !fetched.cached {
                    self.inner
                        .cache
                        .insert_as_of(ticket.query.clone(), page.clone(), fetched.epoch);
                }

                if allow_clamp
                    && self.inner.config.clamp_out_of_range_pages
                    && page.info.is_out_of_range()
                {
                    let clamped = page.info.clamped_page();
                    tracing::debug!(
                        resource = T::RESOURCE,
                        requested = ticket.query.page,
                        clamped,
                        "page out of range, refetching"
                    );
                    shared.query.set_page(clamped);
                    return Ok(Step::Refetch(self.start_generation(&mut shared)));
                }

                shared.in_flight = None;
                self.inner.state.send_modify(|state| {
                    state.page = Some(page.clone());
                    state.loading = false;
                    state.error = None;
                });
                self.inner.stats.record_applied(fetched.latency);
                Ok(Step::Done(page))
            },
            Err(error) => {
                shared.in_flight = None;
                let notification = (!error.is_silent()).then(|| error.notification());
                if notification.is_some() {
                    self.inner.stats.record_failed();
                    tracing::warn!(
                        resource = T::RESOURCE,
                        kind = ?error.kind(),
                        error = %error,
                        "fetch failed"
                    );
                }
                self.inner.state.send_modify(|state| {
                    state.loading = false;
                    if notification.is_some() {
                        state.error = notification;
                    }
                });
                Err(error)
            },
        }
    }

    /// Drops cached pages and reloads after a successful write.
    async fn after_write(&self) {
        self.inner.stats.record_write();
        self.inner.cache.invalidate_all();
        if let Err(error) = self.refresh().await {
            tracing::debug!(
                resource = T::RESOURCE,
                error = %error,
                "reload after write did not apply"
            );
        }
    }
}

fn closed_error() -> Error {
    Error::new(ErrorKind::Cancelled, "list view closed")
}

impl<T: Record> std::fmt::Debug for ListController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("resource", &T::RESOURCE)
            .field("transport", &self.transport_type())
            .field("query", &self.query())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::InMemoryTransport;
    use crate::testing::fixtures::{Brand, brands};
    use crate::types::SortDirection;

    fn setup(count: u64) -> (Arc<InMemoryTransport<Brand>>, ListController<Brand>) {
        let transport = Arc::new(InMemoryTransport::with_records(brands(count)));
        let controller = ListController::new(transport.clone() as Arc<dyn ResourceTransport<Brand>>);
        (transport, controller)
    }

    fn ids(page: &Page<Brand>) -> Vec<u64> {
        page.items.iter().map(|brand| brand.id).collect()
    }

    #[tokio::test]
    async fn test_load_publishes_state() {
        let (_, controller) = setup(12);
        let mut rx = controller.subscribe();

        let page = controller.load().await.unwrap();
        assert_eq!(page.len(), 10);

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert!(!state.loading);
        assert_eq!(state.total_pages(), 2);
        assert!(state.can_go_next());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_states_stream_follows_fetches() {
        use futures::StreamExt;

        let (_, controller) = setup(12);
        let mut states = Box::pin(controller.states());

        let initial = states.next().await.unwrap();
        assert!(initial.page.is_none());

        controller.set_page(2).await.unwrap();
        let latest = states.next().await.unwrap();
        assert!(!latest.loading);
        assert_eq!(latest.items().len(), 2);

        drop(controller);
        assert!(states.next().await.is_none());
    }

    #[tokio::test]
    async fn test_issues_expected_queries() {
        use crate::testing::{MockCall, MockTransport};
        use crate::types::PageInfo;

        let searched = QueryParams::new().with_search("Bandeira 1");
        let second = Page::new(brands(2), PageInfo::new(12, 10, 2));
        let found = Page::new(brands(3), PageInfo::new(3, 10, 1));
        let mock = Arc::new(
            MockTransport::new()
                .expect_list(QueryParams::new().with_page(2), second)
                .expect_list(searched.clone(), found),
        );
        let controller = ListController::new(mock.clone() as Arc<dyn ResourceTransport<Brand>>);

        controller.set_page(2).await.unwrap();
        let page = controller.set_search_text("Bandeira 1").await.unwrap();
        assert_eq!(page.info.total_items, 3);

        mock.verify();
        assert_eq!(mock.calls().last(), Some(&MockCall::List(searched)));
    }

    #[tokio::test]
    async fn test_search_round_trip_restores_first_page() {
        let (_, controller) = setup(25);
        let unfiltered = controller.load().await.unwrap();

        controller.set_page(2).await.unwrap();
        let filtered = controller.set_search_text("Bandeira 2").await.unwrap();
        assert_eq!(filtered.info.total_items, 7);
        assert_eq!(filtered.info.current_page, 1);

        let restored = controller.set_search_text("").await.unwrap();
        assert_eq!(restored, unfiltered);
    }

    #[tokio::test]
    async fn test_sort_toggles_and_rejects_unknown_fields() {
        let (_, controller) = setup(5);
        controller.load().await.unwrap();

        let page = controller.set_sort("id").await.unwrap();
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 5]);
        let page = controller.set_sort("id").await.unwrap();
        assert_eq!(ids(&page), vec![5, 4, 3, 2, 1]);
        assert_eq!(controller.query().sort_direction, SortDirection::Desc);

        let err = controller.set_sort("preco").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(controller.query().sort_field.as_deref(), Some("id"));

        let page = controller.clear_sort().await.unwrap();
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_page_size_must_be_offered() {
        let (_, controller) = setup(45);
        let page = controller.set_page_size(20).await.unwrap();
        assert_eq!(page.len(), 20);
        assert_eq!(page.info.total_pages, 3);

        let err = controller.set_page_size(7).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(controller.query().page_size, 20);
    }

    #[tokio::test]
    async fn test_status_filter_values() {
        let transport = Arc::new(InMemoryTransport::with_records(
            (1..=12)
                .map(|id| {
                    Brand::new(
                        id,
                        format!("Bandeira {id}"),
                        RecordStatus::from_active(id % 4 != 0),
                    )
                })
                .collect(),
        ));
        let controller = ListController::new(transport as Arc<dyn ResourceTransport<Brand>>);

        let page = controller.set_status_filter("Inativo").await.unwrap();
        assert_eq!(page.info.total_items, 3);

        let page = controller.set_status_filter("todos").await.unwrap();
        assert_eq!(page.info.total_items, 12);

        let err = controller.set_status_filter("arquivado").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_out_of_range_page_is_clamped() {
        let (_, controller) = setup(12);
        let page = controller.set_page(5).await.unwrap();
        assert_eq!(page.info.current_page, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(controller.query().page, 2);
        assert_eq!(controller.state().query.page, 2);
    }

    #[tokio::test]
    async fn test_out_of_range_page_kept_when_clamping_is_off() {
        let transport = Arc::new(InMemoryTransport::with_records(brands(12)));
        let controller = ListController::with_config(
            transport as Arc<dyn ResourceTransport<Brand>>,
            ListConfig::builder().clamp_out_of_range_pages(false).build(),
            CacheConfig::default(),
        );
        let page = controller.set_page(5).await.unwrap();
        assert!(page.is_empty());
        assert!(!page.has_next());
        assert_eq!(controller.query().page, 5);
    }

    #[tokio::test]
    async fn test_next_and_previous_page() {
        let (_, controller) = setup(25);
        let page = controller.next_page().await.unwrap();
        assert_eq!(page.info.current_page, 1);

        let page = controller.next_page().await.unwrap();
        assert_eq!(page.info.current_page, 2);
        let page = controller.next_page().await.unwrap();
        assert_eq!(page.info.current_page, 3);
        let page = controller.next_page().await.unwrap();
        assert_eq!(page.info.current_page, 3);

        let page = controller.previous_page().await.unwrap();
        assert_eq!(page.info.current_page, 2);
    }

    #[tokio::test]
    async fn test_cache_hits_and_refresh() {
        let (transport, controller) = setup(12);
        controller.load().await.unwrap();
        controller.load().await.unwrap();
        assert_eq!(transport.request_count(), 1);
        assert_eq!(controller.stats().snapshot().cache_hits, 1);

        controller.refresh().await.unwrap();
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_write_elsewhere_retires_cached_pages() {
        let transport = Arc::new(InMemoryTransport::with_records(brands(12)));
        let epoch = WriteEpoch::new();
        let open = |epoch: &WriteEpoch| {
            ListController::with_write_epoch(
                transport.clone() as Arc<dyn ResourceTransport<Brand>>,
                ListConfig::default(),
                CacheConfig::default(),
                epoch.clone(),
            )
        };
        let list = open(&epoch);
        let other = open(&epoch);

        list.load().await.unwrap();
        other.delete(&RecordId::from(1u64)).await.unwrap();

        let page = list.load().await.unwrap();
        assert_eq!(page.info.total_items, 11);
        assert!(!ids(&page).contains(&1));
        assert_eq!(list.stats().snapshot().cache_hits, 0);
    }

    #[tokio::test]
    async fn test_close_keeps_other_caches() {
        let (transport, controller) = setup(12);
        let other = ListController::with_write_epoch(
            transport.clone() as Arc<dyn ResourceTransport<Brand>>,
            ListConfig::default(),
            CacheConfig::default(),
            controller.inner.cache.epoch().clone(),
        );
        other.load().await.unwrap();
        controller.close();

        other.load().await.unwrap();
        assert_eq!(other.stats().snapshot().cache_hits, 1);
    }

    #[tokio::test]
    async fn test_failure_sets_notification_and_success_clears_it() {
        let (transport, controller) = setup(12);
        let before = controller.load().await.unwrap();

        transport.set_failure(Error::unavailable("backend down"));
        let err = controller.refresh().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);

        let state = controller.state();
        assert!(state.error.is_some());
        assert!(!state.loading);
        assert_eq!(state.page.as_ref(), Some(&before));
        assert_eq!(controller.stats().snapshot().failed, 1);

        controller.refresh().await.unwrap();
        assert!(controller.state().error.is_none());
    }

    #[tokio::test]
    async fn test_writes_reload_the_list() {
        let (transport, controller) = setup(12);
        controller.load().await.unwrap();

        controller
            .create(Brand::new(13, "Hipercard", RecordStatus::Active))
            .await
            .unwrap();
        assert_eq!(controller.state().page.unwrap().info.total_items, 13);

        let updated = controller
            .deactivate(&RecordId::from(13u64))
            .await
            .unwrap();
        assert_eq!(updated.status, RecordStatus::Inactive);

        let toggled = controller.toggle_status(&updated).await.unwrap();
        assert_eq!(toggled.status, RecordStatus::Active);

        controller.delete(&RecordId::from(13u64)).await.unwrap();
        assert_eq!(controller.state().page.unwrap().info.total_items, 12);
        assert_eq!(transport.len(), 12);
        assert_eq!(controller.stats().snapshot().writes, 4);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_list_untouched() {
        let (_, controller) = setup(12);
        let before = controller.load().await.unwrap();

        let err = controller
            .create(Brand::new(1, "Duplicada", RecordStatus::Active))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(controller.state().page, Some(before));

        let err = controller.get(&RecordId::from(99u64)).await.unwrap_err();
        assert_eq!(err.category(), crate::ErrorCategory::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_request_supersedes_older() {
        let (transport, controller) = setup(25);
        transport.set_latency(Duration::from_millis(100));

        let first = tokio::spawn({
            let controller = controller.clone();
            async move { controller.set_page(1).await }
        });
        tokio::task::yield_now().await;

        let page = controller.set_page(2).await.unwrap();
        assert_eq!(page.info.current_page, 2);

        let err = first.await.unwrap().unwrap_err();
        assert!(err.is_silent());

        let state = controller.state();
        assert_eq!(state.page.unwrap().info.current_page, 2);
        assert_eq!(controller.stats().snapshot().superseded, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_in_flight_fetch() {
        let (transport, controller) = setup(12);
        transport.set_latency(Duration::from_millis(100));

        let pending = tokio::spawn({
            let controller = controller.clone();
            async move { controller.load().await }
        });
        tokio::task::yield_now().await;

        controller.close();
        assert!(pending.await.unwrap().unwrap_err().is_silent());

        let state = controller.state();
        assert!(state.page.is_none());
        assert!(!state.loading);

        let err = controller.set_page(2).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
        let err = controller.get(&RecordId::from(1u64)).await.unwrap_err();
        assert!(err.is_silent());
    }

    #[tokio::test]
    async fn test_reset_restores_initial_query() {
        let transport = Arc::new(InMemoryTransport::with_records(brands(30)));
        let controller = ListController::with_config(
            transport as Arc<dyn ResourceTransport<Brand>>,
            ListConfig::builder()
                .default_page_size(20)
                .initial_sort(("descricao".to_string(), SortDirection::Desc))
                .build(),
            CacheConfig::disabled(),
        );
        controller.set_search_text("Bandeira 3").await.unwrap();
        controller.set_page_size(10).await.unwrap();

        controller.reset().await.unwrap();
        let query = controller.query();
        assert_eq!(query, controller.config().initial_query());
        assert_eq!(query.page_size, 20);
    }
}

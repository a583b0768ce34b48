//! An in-process transport backed by a `Vec`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;

use crate::Error;
use crate::paginate::paginate;
use crate::transport::{CancelSignal, ResourceTransport, Transport, TransportStats};
use crate::types::{Page, QueryParams, Record, RecordId, RecordStatus};

type LatencyFn = Arc<dyn Fn(&QueryParams) -> Duration + Send + Sync>;

/// A transport that answers from an in-memory collection.
///
/// `list` runs [`paginate`] over the stored records, so it is the reference
/// behavior the REST backend is held to. It backs the demo datasets and
/// most tests, and can simulate the two things a network adds: latency and
/// failure.
///
/// ## Example
///
/// ```rust
/// use shopdesk::testing::{InMemoryTransport, fixtures::brands};
/// use shopdesk::transport::{CancelSignal, ResourceTransport};
/// use shopdesk::QueryParams;
///
/// # tokio_test::block_on(async {
/// let transport = InMemoryTransport::with_records(brands(12));
/// let page = transport
///     .list(&QueryParams::new().with_page(2), CancelSignal::never())
///     .await
///     .unwrap();
/// assert_eq!(page.len(), 2);
/// # });
/// ```
pub struct InMemoryTransport<T: Record> {
    records: RwLock<Vec<T>>,
    latency: RwLock<LatencyFn>,
    honor_cancellation: AtomicBool,
    request_count: AtomicU64,
    failed_count: AtomicU64,
    simulate_failure: RwLock<Option<Error>>,
}

impl<T: Record> InMemoryTransport<T> {
    /// Creates an empty transport.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Creates a transport holding `records` in insertion order.
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
            latency: RwLock::new(Arc::new(|_: &QueryParams| Duration::ZERO)),
            honor_cancellation: AtomicBool::new(true),
            request_count: AtomicU64::new(0),
            failed_count: AtomicU64::new(0),
            simulate_failure: RwLock::new(None),
        }
    }

    /// Delays every `list` by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.write() = Arc::new(move |_: &QueryParams| latency);
    }

    /// Delays each `list` by a per-query latency.
    pub fn set_latency_fn<F>(&self, latency: F)
    where
        F: Fn(&QueryParams) -> Duration + Send + Sync + 'static,
    {
        *self.latency.write() = Arc::new(latency);
    }

    /// When `false`, `list` ignores its cancel signal and always completes,
    /// like a backend that cannot abort a request.
    pub fn set_honor_cancellation(&self, honor: bool) {
        self.honor_cancellation.store(honor, Ordering::Relaxed);
    }

    /// Fails the next request with `error`.
    pub fn set_failure(&self, error: Error) {
        *self.simulate_failure.write() = Some(error);
    }

    /// Clears a pending simulated failure.
    pub fn clear_failure(&self) {
        *self.simulate_failure.write() = None;
    }

    /// Returns the number of requests received.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Appends records.
    pub fn extend(&self, records: impl IntoIterator<Item = T>) {
        self.records.write().extend(records);
    }

    /// Replaces all records.
    pub fn replace_all(&self, records: Vec<T>) {
        *self.records.write() = records;
    }

    /// Returns a copy of the stored records.
    pub fn records(&self) -> Vec<T> {
        self.records.read().clone()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn begin_request(&self) -> Result<(), Error> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        let failure = self.simulate_failure.write().take();
        if let Some(error) = failure {
            self.failed_count.fetch_add(1, Ordering::Relaxed);
            return Err(error);
        }
        Ok(())
    }

    fn position(records: &[T], id: &RecordId) -> Option<usize> {
        records.iter().position(|record| record.id() == *id)
    }
}

impl<T: Record> Default for InMemoryTransport<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> std::fmt::Debug for InMemoryTransport<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTransport")
            .field("resource", &T::RESOURCE)
            .field("records", &self.len())
            .field("request_count", &self.request_count())
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl<T: Record> ResourceTransport<T> for InMemoryTransport<T> {
    async fn list(&self, query: &QueryParams, cancel: CancelSignal) -> Result<Page<T>, Error> {
        self.begin_request()?;

        let latency = Arc::clone(&*self.latency.read());
        let delay = latency(query);
        if !delay.is_zero() {
            if self.honor_cancellation.load(Ordering::Relaxed) {
                cancel
                    .run(async {
                        tokio::time::sleep(delay).await;
                        Ok(())
                    })
                    .await?;
            } else {
                tokio::time::sleep(delay).await;
            }
        }
        if self.honor_cancellation.load(Ordering::Relaxed) {
            cancel.check()?;
        }

        let records = self.records.read();
        Ok(paginate(&records, query))
    }

    async fn get(&self, id: &RecordId) -> Result<T, Error> {
        self.begin_request()?;
        let records = self.records.read();
        Self::position(&records, id)
            .map(|index| records[index].clone())
            .ok_or_else(|| Error::record_not_found(T::RESOURCE, id))
    }

    async fn create(&self, record: T) -> Result<T, Error> {
        self.begin_request()?;
        let mut records = self.records.write();
        let id = record.id();
        if Self::position(&records, &id).is_some() {
            return Err(Error::conflict(format!(
                "{} {} already exists",
                T::RESOURCE,
                id
            )));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &RecordId, record: T) -> Result<T, Error> {
        self.begin_request()?;
        let mut records = self.records.write();
        let index =
            Self::position(&records, id).ok_or_else(|| Error::record_not_found(T::RESOURCE, id))?;
        records[index] = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), Error> {
        self.begin_request()?;
        let mut records = self.records.write();
        let index =
            Self::position(&records, id).ok_or_else(|| Error::record_not_found(T::RESOURCE, id))?;
        records.remove(index);
        Ok(())
    }

    async fn set_status(&self, id: &RecordId, status: RecordStatus) -> Result<T, Error> {
        self.begin_request()?;
        let mut records = self.records.write();
        let index =
            Self::position(&records, id).ok_or_else(|| Error::record_not_found(T::RESOURCE, id))?;
        records[index].set_status(status);
        Ok(records[index].clone())
    }

    fn transport_type(&self) -> Transport {
        Transport::InMemory
    }

    fn stats(&self) -> TransportStats {
        TransportStats {
            transport: Transport::InMemory,
            requests_sent: self.request_count(),
            requests_failed: self.failed_count.load(Ordering::Relaxed),
        }
    }
}

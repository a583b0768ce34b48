//! MockTransport for testing with expectations.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::ErrorKind;
use crate::transport::{CancelSignal, ResourceTransport, Transport, TransportStats};
use crate::types::{Page, QueryParams, Record, RecordId, RecordStatus};
use crate::Error;

/// A call received by a [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    /// `list` with its query.
    List(QueryParams),
    /// `get` of an id.
    Get(RecordId),
    /// `create` of a record with this id.
    Create(RecordId),
    /// `update` of an id.
    Update(RecordId),
    /// `delete` of an id.
    Delete(RecordId),
    /// `set_status` of an id.
    SetStatus(RecordId, RecordStatus),
}

enum ListResponse<T> {
    Page(Page<T>),
    Error(ErrorKind),
}

struct ListExpectation<T> {
    query: QueryParams,
    response: ListResponse<T>,
}

/// A transport that answers from scripted expectations.
///
/// `list` calls must match an expected [`QueryParams`] exactly; anything
/// unexpected fails with an `Internal` error naming the query. Writes
/// succeed against a small record map so controller flows can be driven
/// without a backend.
///
/// ## Example
///
/// ```rust
/// use shopdesk::testing::{MockTransport, fixtures::brands};
/// use shopdesk::{Page, PageInfo, QueryParams};
///
/// let first_page = Page::new(brands(10), PageInfo::new(12, 10, 1));
/// let mock = MockTransport::new().expect_list(QueryParams::new(), first_page);
///
/// // ...drive a ListController with the mock...
/// // mock.verify() at the end to ensure all expectations were met
/// ```
pub struct MockTransport<T: Record> {
    expectations: Mutex<Vec<ListExpectation<T>>>,
    records: Mutex<HashMap<RecordId, T>>,
    calls: Mutex<Vec<MockCall>>,
}

impl<T: Record> MockTransport<T> {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self {
            expectations: Mutex::new(Vec::new()),
            records: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers `list(query)` with `page`.
    #[must_use]
    pub fn expect_list(self, query: QueryParams, page: Page<T>) -> Self {
        self.expectations.lock().push(ListExpectation {
            query,
            response: ListResponse::Page(page),
        });
        self
    }

    /// Answers `list(query)` with an error of `kind`.
    #[must_use]
    pub fn expect_list_error(self, query: QueryParams, kind: ErrorKind) -> Self {
        self.expectations.lock().push(ListExpectation {
            query,
            response: ListResponse::Error(kind),
        });
        self
    }

    /// Makes `record` available to `get`, `update`, `delete` and `set_status`.
    #[must_use]
    pub fn with_record(self, record: T) -> Self {
        self.records.lock().insert(record.id(), record);
        self
    }

    /// Asserts that every expected `list` query was requested.
    ///
    /// # Panics
    ///
    /// Panics if any expectation was not met.
    pub fn verify(&self) {
        let expectations = self.expectations.lock();
        let calls = self.calls.lock();

        for expectation in expectations.iter() {
            let called = calls
                .iter()
                .any(|call| matches!(call, MockCall::List(query) if *query == expectation.query));
            assert!(called, "expected list({:?}) was never called", expectation.query);
        }
    }

    /// Returns every call received, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Returns the number of calls received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Clears expectations, records and recorded calls.
    pub fn reset(&self) {
        self.expectations.lock().clear();
        self.records.lock().clear();
        self.calls.lock().clear();
    }

    fn record_call(&self, call: MockCall) {
        self.calls.lock().push(call);
    }

    fn stored(&self, id: &RecordId) -> Result<T, Error> {
        self.records
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::record_not_found(T::RESOURCE, id))
    }
}

impl<T: Record> Default for MockTransport<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<T: Record> ResourceTransport<T> for MockTransport<T> {
    async fn list(&self, query: &QueryParams, cancel: CancelSignal) -> Result<Page<T>, Error> {
        self.record_call(MockCall::List(query.clone()));
        cancel.check()?;

        let expectations = self.expectations.lock();
        let expectation = expectations
            .iter()
            .find(|expectation| expectation.query == *query)
            .ok_or_else(|| Error::internal(format!("unexpected list({:?})", query)))?;

        match expectation.response {
            ListResponse::Page(ref page) => Ok(page.clone()),
            ListResponse::Error(kind) => Err(Error::from_kind(kind)),
        }
    }

    async fn get(&self, id: &RecordId) -> Result<T, Error> {
        self.record_call(MockCall::Get(id.clone()));
        self.stored(id)
    }

    async fn create(&self, record: T) -> Result<T, Error> {
        self.record_call(MockCall::Create(record.id()));
        self.records.lock().insert(record.id(), record.clone());
        Ok(record)
    }

    async fn update(&self, id: &RecordId, record: T) -> Result<T, Error> {
        self.record_call(MockCall::Update(id.clone()));
        self.stored(id)?;
        self.records.lock().insert(id.clone(), record.clone());
        Ok(record)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), Error> {
        self.record_call(MockCall::Delete(id.clone()));
        self.records
            .lock()
            .remove(id)
            .map(drop)
            .ok_or_else(|| Error::record_not_found(T::RESOURCE, id))
    }

    async fn set_status(&self, id: &RecordId, status: RecordStatus) -> Result<T, Error> {
        self.record_call(MockCall::SetStatus(id.clone(), status));
        let mut records = self.records.lock();
        let record = records
            .get_mut(id)
            .ok_or_else(|| Error::record_not_found(T::RESOURCE, id))?;
        record.set_status(status);
        Ok(record.clone())
    }

    fn transport_type(&self) -> Transport {
        Transport::Mock
    }

    fn stats(&self) -> TransportStats {
        TransportStats {
            transport: Transport::Mock,
            requests_sent: self.call_count() as u64,
            requests_failed: 0,
        }
    }
}

//! Client types for the back-office resources.
//!
//! - [`Client`]: top-level handle, owns the backend and list configuration
//! - [`ResourceClient`]: one resource type, with list, detail and write calls
//! - [`ListRequest`]: a one-off page fetch
//!
//! ## Quick Start
//!
//! ```rust
//! use shopdesk::Client;
//! use shopdesk::resources::card_brand::{self, CardBrand};
//!
//! # tokio_test::block_on(async {
//! let client = Client::builder().in_memory().build()?;
//! client.seed(card_brand::sample(25))?;
//!
//! let brands = client.resource::<CardBrand>();
//! let page = brands.list().search("visa").await?;
//! assert_eq!(page.info.total_items, 1);
//!
//! let list = brands.list_controller();
//! let page = list.set_page(3).await?;
//! assert_eq!(page.len(), 5);
//! # Ok::<(), shopdesk::Error>(())
//! # });
//! ```

mod builder;
mod inner;
mod request;

pub use builder::{ClientBuilder, HasBackend, NoBackend};
pub use request::ListRequest;

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use crate::cache::WriteEpoch;
use crate::config::{CacheConfig, ListConfig, RetryConfig};
use crate::controller::ListController;
use crate::error::{Error, Result};
use crate::testing::InMemoryTransport;
use crate::tracing_support::write_span;
use crate::transport::{ResourceTransport, Transport};
use crate::types::{Record, RecordId, RecordStatus};

/// The shopdesk client.
///
/// Create one with [`Client::builder()`], then take a
/// [`ResourceClient`] per record type.
///
/// `Client` is `Clone` and thread-safe; clones share the backend.
#[derive(Clone)]
pub struct Client {
    inner: Arc<inner::ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    ///
    /// The builder uses the typestate pattern: `build` is only available
    /// once a backend is chosen.
    pub fn builder() -> ClientBuilder<NoBackend> {
        ClientBuilder::new()
    }

    /// Returns the client for records of type `T`.
    pub fn resource<T: Record>(&self) -> ResourceClient<T> {
        ResourceClient {
            client: self.clone(),
            transport: self.inner.backend.resource::<T>(),
            epoch: self.inner.write_epochs.get::<T>(),
        }
    }

    /// Adds `records` to the in-memory collection of their type.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error for REST clients.
    pub fn seed<T: Record>(&self, records: impl IntoIterator<Item = T>) -> Result<()> {
        let transport = self.in_memory::<T>().ok_or_else(|| {
            Error::configuration("only in-memory clients can be seeded")
        })?;
        transport.extend(records);
        tracing::debug!(resource = T::RESOURCE, total = transport.len(), "collection seeded");
        Ok(())
    }

    /// Returns the in-memory collection of `T`, or `None` for REST clients.
    pub fn in_memory<T: Record>(&self) -> Option<Arc<InMemoryTransport<T>>> {
        match self.inner.backend {
            inner::Backend::InMemory(ref registry) => Some(registry.get_or_create::<T>()),
            #[cfg(feature = "rest")]
            inner::Backend::Rest(_) => None,
        }
    }

    /// Sets the bearer token of a REST client. No effect in memory.
    pub fn set_bearer_token(&self, token: impl Into<String>) {
        #[cfg(feature = "rest")]
        if let inner::Backend::Rest(ref rest) = self.inner.backend {
            rest.set_auth_token(token);
            return;
        }
        let _ = token.into();
    }

    /// Returns the backend type.
    pub fn transport(&self) -> Transport {
        self.inner.backend.transport()
    }

    /// Returns the configuration of list views.
    pub fn list_config(&self) -> &ListConfig {
        &self.inner.list_config
    }

    /// Returns the page cache configuration.
    pub fn cache_config(&self) -> &CacheConfig {
        &self.inner.cache_config
    }

    /// Returns the REST retry configuration.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry_config
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

/// Calls for one resource type.
///
/// Every resource client and [`ListController`] of one record type shares a
/// write epoch. A successful write here retires the pages cached by those
/// controllers, so their next fetch reaches the backend. Only the
/// controller's own write methods refresh its list right away.
pub struct ResourceClient<T: Record> {
    client: Client,
    transport: Arc<dyn ResourceTransport<T>>,
    epoch: WriteEpoch,
}

impl<T: Record> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
            epoch: self.epoch.clone(),
        }
    }
}

impl<T: Record> ResourceClient<T> {
    /// Starts a page fetch with the list defaults.
    ///
    /// ```rust
    /// # use shopdesk::{Client, SortDirection};
    /// # use shopdesk::resources::vehicle::{self, Vehicle};
    /// # tokio_test::block_on(async {
    /// # let client = Client::builder().in_memory().build()?;
    /// # client.seed(vehicle::sample(30))?;
    /// let page = client
    ///     .resource::<Vehicle>()
    ///     .list()
    ///     .page(2)
    ///     .sort("placa", SortDirection::Desc)
    ///     .await?;
    /// assert_eq!(page.info.current_page, 2);
    /// # Ok::<(), shopdesk::Error>(())
    /// # });
    /// ```
    pub fn list(&self) -> ListRequest<'_, T> {
        ListRequest::new(self, self.client.list_config().initial_query())
    }

    /// Fetches one record.
    pub async fn get(&self, id: impl Into<RecordId>) -> Result<T> {
        self.transport.get(&id.into()).await
    }

    /// Creates a record.
    pub async fn create(&self, record: T) -> Result<T> {
        let created = self
            .transport
            .create(record)
            .instrument(write_span(T::RESOURCE, "create", None))
            .await?;
        self.epoch.bump();
        Ok(created)
    }

    /// Replaces a record.
    pub async fn update(&self, id: impl Into<RecordId>, record: T) -> Result<T> {
        let id = id.into();
        let updated = self
            .transport
            .update(&id, record)
            .instrument(write_span(T::RESOURCE, "update", Some(id.as_str())))
            .await?;
        self.epoch.bump();
        Ok(updated)
    }

    /// Deletes a record.
    pub async fn delete(&self, id: impl Into<RecordId>) -> Result<()> {
        let id = id.into();
        self.transport
            .delete(&id)
            .instrument(write_span(T::RESOURCE, "delete", Some(id.as_str())))
            .await?;
        self.epoch.bump();
        Ok(())
    }

    /// Marks a record active.
    pub async fn activate(&self, id: impl Into<RecordId>) -> Result<T> {
        self.set_status(id.into(), RecordStatus::Active, "activate").await
    }

    /// Marks a record inactive.
    pub async fn deactivate(&self, id: impl Into<RecordId>) -> Result<T> {
        self.set_status(id.into(), RecordStatus::Inactive, "deactivate").await
    }

    async fn set_status(&self, id: RecordId, status: RecordStatus, op: &'static str) -> Result<T> {
        let record = self
            .transport
            .set_status(&id, status)
            .instrument(write_span(T::RESOURCE, op, Some(id.as_str())))
            .await?;
        self.epoch.bump();
        Ok(record)
    }

    /// Creates a list view controller using the client's configuration.
    ///
    /// The controller shares this resource's write epoch.
    pub fn list_controller(&self) -> ListController<T> {
        ListController::with_write_epoch(
            Arc::clone(&self.transport),
            self.client.list_config().clone(),
            self.client.cache_config().clone(),
            self.epoch.clone(),
        )
    }

    /// Returns the transport behind this resource.
    pub fn transport(&self) -> Arc<dyn ResourceTransport<T>> {
        Arc::clone(&self.transport)
    }

    pub(crate) fn transport_ref(&self) -> &dyn ResourceTransport<T> {
        self.transport.as_ref()
    }
}

impl<T: Record> std::fmt::Debug for ResourceClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &T::RESOURCE)
            .field("transport", &self.transport.transport_type())
            .finish()
    }
}

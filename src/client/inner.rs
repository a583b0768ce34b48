//! Internal client implementation.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::WriteEpoch;
use crate::config::{CacheConfig, ListConfig, RetryConfig};
use crate::testing::InMemoryTransport;
#[cfg(feature = "rest")]
use crate::transport::RestTransport;
use crate::transport::{ResourceTransport, Transport};
use crate::types::Record;

pub(crate) struct ClientInner {
    /// Where records come from.
    pub backend: Backend,

    /// Retry configuration of the REST transport.
    pub retry_config: RetryConfig,

    /// Configuration of list views.
    pub list_config: ListConfig,

    /// Page cache configuration of list views.
    pub cache_config: CacheConfig,

    /// Request timeout.
    pub timeout: Duration,

    /// Write epochs of the resources handed out so far.
    pub write_epochs: WriteEpochs,
}

pub(crate) enum Backend {
    #[cfg(feature = "rest")]
    Rest(Arc<RestTransport>),
    InMemory(InMemoryRegistry),
}

impl Backend {
    pub fn transport(&self) -> Transport {
        match self {
            #[cfg(feature = "rest")]
            Backend::Rest(_) => Transport::Http,
            Backend::InMemory(_) => Transport::InMemory,
        }
    }

    /// Transport serving records of type `T`.
    pub fn resource<T: Record>(&self) -> Arc<dyn ResourceTransport<T>> {
        match self {
            #[cfg(feature = "rest")]
            Backend::Rest(rest) => Arc::clone(rest) as Arc<dyn ResourceTransport<T>>,
            Backend::InMemory(registry) => {
                registry.get_or_create::<T>() as Arc<dyn ResourceTransport<T>>
            },
        }
    }
}

/// One write epoch per resource path.
#[derive(Default)]
pub(crate) struct WriteEpochs {
    epochs: Mutex<HashMap<&'static str, WriteEpoch>>,
}

impl WriteEpochs {
    pub fn get<T: Record>(&self) -> WriteEpoch {
        self.epochs.lock().entry(T::RESOURCE).or_default().clone()
    }
}

/// One in-memory collection per record type.
#[derive(Default)]
pub(crate) struct InMemoryRegistry {
    transports: Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl InMemoryRegistry {
    pub fn get_or_create<T: Record>(&self) -> Arc<InMemoryTransport<T>> {
        let mut transports = self.transports.lock();
        let key = TypeId::of::<T>();

        if let Some(existing) = transports.get(&key) {
            if let Ok(transport) = Arc::clone(existing).downcast::<InMemoryTransport<T>>() {
                return transport;
            }
        }

        let transport = Arc::new(InMemoryTransport::<T>::new());
        transports.insert(key, Arc::clone(&transport) as Arc<dyn Any + Send + Sync>);
        tracing::debug!(resource = T::RESOURCE, "in-memory collection created");
        transport
    }
}

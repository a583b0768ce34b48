//! Transport trait definitions and common types.

use crate::Error;
use crate::transport::CancelSignal;
use crate::types::{Page, QueryParams, Record, RecordId, RecordStatus};

// ============================================================================
// Transport Enum
// ============================================================================

/// Where a resource's records come from.
///
/// ## Example
///
/// ```rust
/// use shopdesk::Transport;
///
/// let transport = Transport::Http;
/// assert!(transport.is_http());
/// assert_eq!(transport.to_string(), "HTTP/REST");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// REST backend over HTTP (default).
    #[default]
    Http,
    /// In-process collection sliced by the reference algorithm.
    InMemory,
    /// Scripted responses for tests.
    Mock,
}

impl Transport {
    /// Returns `true` if this is the REST transport.
    pub fn is_http(&self) -> bool {
        matches!(self, Transport::Http)
    }

    /// Returns `true` if this is the in-memory transport.
    pub fn is_in_memory(&self) -> bool {
        matches!(self, Transport::InMemory)
    }

    /// Returns `true` if this is the mock transport.
    pub fn is_mock(&self) -> bool {
        matches!(self, Transport::Mock)
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transport::Http => write!(f, "HTTP/REST"),
            Transport::InMemory => write!(f, "in-memory"),
            Transport::Mock => write!(f, "Mock"),
        }
    }
}

// ============================================================================
// Transport Stats
// ============================================================================

/// Request counters of a transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Transport these counters belong to.
    pub transport: Transport,
    /// Requests sent, including retries.
    pub requests_sent: u64,
    /// Requests that ended in an error.
    pub requests_failed: u64,
}

// ============================================================================
// Resource Transport Trait
// ============================================================================

/// Fetches and writes records of one resource.
///
/// `list` answers a [`QueryParams`] with one [`Page`], exactly as
/// [`paginate`](crate::paginate::paginate) would over the full collection.
/// It must give up promptly with [`ErrorKind::Cancelled`](crate::ErrorKind::Cancelled)
/// once `cancel` fires, returning no partial result.
#[async_trait::async_trait]
pub trait ResourceTransport<T: Record>: Send + Sync {
    /// Fetches one page.
    async fn list(&self, query: &QueryParams, cancel: CancelSignal) -> Result<Page<T>, Error>;

    /// Fetches one record. Missing records fail with `NotFound`.
    async fn get(&self, id: &RecordId) -> Result<T, Error>;

    /// Creates a record and returns it as stored.
    async fn create(&self, record: T) -> Result<T, Error>;

    /// Replaces the record with `id`.
    async fn update(&self, id: &RecordId, record: T) -> Result<T, Error>;

    /// Deletes the record with `id`.
    async fn delete(&self, id: &RecordId) -> Result<(), Error>;

    /// Activates or deactivates the record with `id`.
    async fn set_status(&self, id: &RecordId, status: RecordStatus) -> Result<T, Error>;

    /// Returns the transport type.
    fn transport_type(&self) -> Transport;

    /// Returns request counters.
    fn stats(&self) -> TransportStats {
        TransportStats {
            transport: self.transport_type(),
            ..Default::default()
        }
    }
}

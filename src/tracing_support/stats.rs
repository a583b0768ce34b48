//! Fetch counters for a list.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counters describing how a list's fetches went.
///
/// Clones share the same counters.
///
/// ## Example
///
/// ```rust
/// use shopdesk::tracing_support::FetchStats;
/// use std::time::Duration;
///
/// let stats = FetchStats::new();
/// stats.record_issued();
/// stats.record_applied(Duration::from_millis(40));
///
/// let snapshot = stats.snapshot();
/// assert_eq!(snapshot.issued, 1);
/// assert_eq!(snapshot.applied, 1);
/// assert_eq!(snapshot.latency_avg, Duration::from_millis(40));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FetchStats {
    inner: Arc<FetchStatsInner>,
}

#[derive(Debug, Default)]
struct FetchStatsInner {
    issued: AtomicU64,
    applied: AtomicU64,
    superseded: AtomicU64,
    failed: AtomicU64,
    cache_hits: AtomicU64,
    writes: AtomicU64,
    // Sum and count of applied fetch latencies.
    latency_sum_ns: AtomicU64,
    latency_count: AtomicU64,
}

impl FetchStats {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fetch was started.
    pub fn record_issued(&self) {
        self.inner.issued.fetch_add(1, Ordering::Relaxed);
    }

    /// A fetch result reached the visible state.
    pub fn record_applied(&self, latency: Duration) {
        self.inner.applied.fetch_add(1, Ordering::Relaxed);
        let nanos = u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX);
        self.inner.latency_sum_ns.fetch_add(nanos, Ordering::Relaxed);
        self.inner.latency_count.fetch_add(1, Ordering::Relaxed);
    }

    /// A fetch lost to a newer one and was discarded.
    pub fn record_superseded(&self) {
        self.inner.superseded.fetch_add(1, Ordering::Relaxed);
    }

    /// A fetch failed.
    pub fn record_failed(&self) {
        self.inner.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// A fetch was answered from the page cache.
    pub fn record_cache_hit(&self) {
        self.inner.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// A write went through the list.
    pub fn record_write(&self) {
        self.inner.writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the current values.
    pub fn snapshot(&self) -> FetchStatsSnapshot {
        let count = self.inner.latency_count.load(Ordering::Relaxed);
        let sum = self.inner.latency_sum_ns.load(Ordering::Relaxed);

        FetchStatsSnapshot {
            issued: self.inner.issued.load(Ordering::Relaxed),
            applied: self.inner.applied.load(Ordering::Relaxed),
            superseded: self.inner.superseded.load(Ordering::Relaxed),
            failed: self.inner.failed.load(Ordering::Relaxed),
            cache_hits: self.inner.cache_hits.load(Ordering::Relaxed),
            writes: self.inner.writes.load(Ordering::Relaxed),
            latency_avg: if count > 0 {
                Duration::from_nanos(sum / count)
            } else {
                Duration::ZERO
            },
        }
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        for counter in [
            &self.inner.issued,
            &self.inner.applied,
            &self.inner.superseded,
            &self.inner.failed,
            &self.inner.cache_hits,
            &self.inner.writes,
            &self.inner.latency_sum_ns,
            &self.inner.latency_count,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Point-in-time copy of [`FetchStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStatsSnapshot {
    /// Fetches started.
    pub issued: u64,
    /// Fetches whose result was applied.
    pub applied: u64,
    /// Fetches discarded for a newer one.
    pub superseded: u64,
    /// Fetches that failed.
    pub failed: u64,
    /// Fetches answered from cache.
    pub cache_hits: u64,
    /// Writes made through the list.
    pub writes: u64,
    /// Mean latency of applied fetches.
    pub latency_avg: Duration,
}

//! Cache of fetched pages, keyed by the full query.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::config::CacheConfig;
use crate::types::{Page, QueryParams};

/// Count of writes made to one resource.
///
/// Clones share the counter. Every [`PageCache`] of a resource holds the
/// same epoch, so a write through any handle retires the pages cached by
/// all of them.
#[derive(Debug, Clone, Default)]
pub struct WriteEpoch(Arc<AtomicU64>);

impl WriteEpoch {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of writes seen so far.
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Records a write.
    pub fn bump(&self) {
        self.0.fetch_add(1, Ordering::AcqRel);
    }
}

struct Entry<T> {
    page: Page<T>,
    inserted_at: Instant,
    epoch: u64,
}

/// Fetched pages of one list, keyed by [`QueryParams`].
///
/// Two queries share an entry only when every parameter is equal. Entries
/// older than the TTL are never served; when full, the oldest entry is
/// evicted. Entries stored before the last write to the resource (see
/// [`WriteEpoch`]) are never served either. Uses the tokio clock, so
/// paused-time tests can expire entries.
///
/// ```rust
/// use shopdesk::{CacheConfig, Page, QueryParams, cache::PageCache};
///
/// # tokio_test::block_on(async {
/// let cache: PageCache<u32> = PageCache::new(CacheConfig::default());
/// let query = QueryParams::new();
/// cache.insert(query.clone(), Page::default());
/// assert!(cache.get(&query).is_some());
/// assert!(cache.get(&query.clone().with_page(2)).is_none());
/// # });
/// ```
pub struct PageCache<T> {
    config: CacheConfig,
    epoch: WriteEpoch,
    entries: Mutex<HashMap<QueryParams, Entry<T>>>,
}

impl<T: Clone> PageCache<T> {
    /// Creates an empty cache with its own write epoch.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_epoch(config, WriteEpoch::new())
    }

    /// Creates an empty cache retired by writes counted on `epoch`.
    pub fn with_epoch(config: CacheConfig, epoch: WriteEpoch) -> Self {
        Self {
            config,
            epoch,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the write epoch this cache follows.
    pub fn epoch(&self) -> &WriteEpoch {
        &self.epoch
    }

    /// Returns the cached page for `query` if it is still fresh.
    pub fn get(&self, query: &QueryParams) -> Option<Page<T>> {
        if !self.config.is_active() {
            return None;
        }
        let epoch = self.epoch.current();
        let mut entries = self.entries.lock();
        let fresh = entries.get(query).map(|entry| {
            entry.epoch == epoch && entry.inserted_at.elapsed() < self.config.ttl
        })?;
        if fresh {
            entries.get(query).map(|entry| entry.page.clone())
        } else {
            entries.remove(query);
            None
        }
    }

    /// Stores `page` as the answer to `query`.
    pub fn insert(&self, query: QueryParams, page: Page<T>) {
        self.insert_as_of(query, page, self.epoch.current());
    }

    /// Stores `page`, fetched when the write epoch read `epoch`.
    ///
    /// The page is dropped if a write happened since, because the backend
    /// may have answered with the collection as it was before that write.
    pub fn insert_as_of(&self, query: QueryParams, page: Page<T>, epoch: u64) {
        if !self.config.is_active() {
            return;
        }
        let current = self.epoch.current();
        if epoch != current {
            return;
        }
        let mut entries = self.entries.lock();
        let ttl = self.config.ttl;
        entries.retain(|_, entry| entry.epoch == current && entry.inserted_at.elapsed() < ttl);

        if !entries.contains_key(&query) && entries.len() >= self.config.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            query,
            Entry {
                page,
                inserted_at: Instant::now(),
                epoch,
            },
        );
    }

    /// Records a write: every cache sharing the epoch stops serving what it
    /// holds, and this one drops its entries.
    pub fn invalidate_all(&self) {
        self.epoch.bump();
        self.clear();
    }

    /// Drops this cache's entries without touching caches that share the
    /// epoch.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Returns the number of stored entries, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<T> std::fmt::Debug for PageCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageCache")
            .field("config", &self.config)
            .field("epoch", &self.epoch.current())
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::types::PageInfo;

    fn page(n: u32) -> Page<u32> {
        Page::new(vec![n], PageInfo::new(1, 10, 1))
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_and_expiry() {
        let cache = PageCache::new(CacheConfig::builder().ttl(Duration::from_secs(30)).build());
        let query = QueryParams::new().with_search("visa");
        cache.insert(query.clone(), page(1));

        assert_eq!(cache.get(&query).unwrap().items, vec![1]);
        tokio::time::advance(Duration::from_secs(31)).await;
        assert!(cache.get(&query).is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_evicts_oldest() {
        let cache = PageCache::new(CacheConfig::builder().max_entries(2).build());
        for n in 1..=3 {
            cache.insert(QueryParams::new().with_page(n), page(n));
            tokio::time::advance(Duration::from_millis(10)).await;
        }
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&QueryParams::new().with_page(1)).is_none());
        assert!(cache.get(&QueryParams::new().with_page(3)).is_some());
    }

    #[tokio::test]
    async fn test_disabled_never_stores() {
        let cache = PageCache::new(CacheConfig::disabled());
        cache.insert(QueryParams::new(), page(1));
        assert!(cache.get(&QueryParams::new()).is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = PageCache::new(CacheConfig::default());
        cache.insert(QueryParams::new(), page(1));
        cache.insert(QueryParams::new().with_page(2), page(2));
        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_write_through_one_cache_retires_the_other() {
        let epoch = WriteEpoch::new();
        let list_a = PageCache::with_epoch(CacheConfig::default(), epoch.clone());
        let list_b = PageCache::with_epoch(CacheConfig::default(), epoch.clone());
        list_a.insert(QueryParams::new(), page(1));
        list_b.insert(QueryParams::new(), page(1));

        list_a.invalidate_all();
        assert!(list_b.get(&QueryParams::new()).is_none());

        // A write made outside any cache counts too.
        list_b.insert(QueryParams::new(), page(2));
        epoch.bump();
        assert!(list_b.get(&QueryParams::new()).is_none());
    }

    #[tokio::test]
    async fn test_page_fetched_before_a_write_is_not_stored() {
        let cache = PageCache::new(CacheConfig::default());
        let started = cache.epoch().current();
        cache.epoch().bump();

        cache.insert_as_of(QueryParams::new(), page(1), started);
        assert!(cache.is_empty());

        cache.insert_as_of(QueryParams::new(), page(1), cache.epoch().current());
        assert!(cache.get(&QueryParams::new()).is_some());
    }

    #[tokio::test]
    async fn test_clear_keeps_shared_epoch() {
        let epoch = WriteEpoch::new();
        let cache = PageCache::with_epoch(CacheConfig::default(), epoch.clone());
        cache.insert(QueryParams::new(), page(1));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(epoch.current(), 0);
    }

    #[tokio::test]
    async fn test_distinct_keys_per_parameter() {
        let cache = PageCache::new(CacheConfig::default());
        cache.insert(QueryParams::new().with_page_size(20), page(20));
        assert!(cache.get(&QueryParams::new()).is_none());
        assert!(cache.get(&QueryParams::new().with_page_size(20)).is_some());
    }
}

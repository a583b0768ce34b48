//! Page cache configuration.

use std::time::Duration;

/// Configuration for the per-list cache of fetched pages.
///
/// A cached page answers a query identical to one already fetched (paging
/// back, clearing a search) without a request. Every write made through the
/// list clears the cache, and entries expire after `ttl` so changes made by
/// other users show up on the next navigation.
///
/// ## Example
///
/// ```rust
/// use shopdesk::CacheConfig;
/// use std::time::Duration;
///
/// let config = CacheConfig::builder()
///     .ttl(Duration::from_secs(10))
///     .max_entries(16)
///     .build();
/// assert!(config.enabled);
///
/// assert!(!CacheConfig::disabled().enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct CacheConfig {
    /// Whether fetched pages are cached.
    #[builder(default = true)]
    pub enabled: bool,

    /// How long a page stays fresh.
    #[builder(default = Duration::from_secs(30))]
    pub ttl: Duration,

    /// Pages kept per list; the oldest is evicted first.
    #[builder(default = 64)]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CacheConfig {
    /// Creates a configuration with caching turned off.
    pub fn disabled() -> Self {
        Self::builder().enabled(false).build()
    }

    /// Returns `true` if pages should be cached at all.
    pub fn is_active(&self) -> bool {
        self.enabled && self.max_entries > 0 && !self.ttl.is_zero()
    }
}

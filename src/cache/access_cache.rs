//! Access Cache Module
//!
//! Thread-safe handle around a `CacheStore`, estimating value sizes and
//! timing every get and set.

use std::collections::HashMap;
use std::time::Instant;

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::Result;
use crate::size::{estimate_size, SizeEstimable};

// == Access Cache ==
/// A byte-bounded cache that keeps the most recently accessed values.
///
/// Entries, sizes and recency order share one lock. Every operation,
/// including the read-only accessors, takes it for its whole body, so
/// accessors never observe a half-finished eviction. Share the cache across
/// threads with `Arc<AccessCache<V>>`.
///
/// # Example
/// ```
/// use access_cache::AccessCache;
///
/// let cache = AccessCache::new(40);
/// cache.set("a", 1i64).unwrap();
/// cache.set("b", 2i64).unwrap();
///
/// assert_eq!(cache.get("a"), Some(1));
/// assert_eq!(cache.most_recent_key().as_deref(), Some("a"));
/// assert_eq!(cache.current_size(), 16);
/// ```
#[derive(Debug)]
pub struct AccessCache<V> {
    store: Mutex<CacheStore<V>>,
}

impl<V> AccessCache<V> {
    // == Constructors ==
    /// Creates an empty cache holding at most `max_bytes` of estimated data.
    ///
    /// # Panics
    /// Panics if `max_bytes` is zero. Use [`try_new`](Self::try_new) to get
    /// an error instead.
    pub fn new(max_bytes: u64) -> Self {
        match Self::try_new(max_bytes) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an empty cache, rejecting a zero budget.
    pub fn try_new(max_bytes: u64) -> Result<Self> {
        Ok(Self {
            store: Mutex::new(CacheStore::new(max_bytes)?),
        })
    }

    /// Creates an empty cache from a validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let cache = Self::try_new(config.max_bytes)?;
        cache.set_verbose(config.verbose);
        Ok(cache)
    }

    // == Accessors ==
    /// Returns the number of cached keys.
    pub fn count(&self) -> usize {
        self.store.lock().count()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Returns the estimated size of all cached values in bytes.
    pub fn current_size(&self) -> u64 {
        self.store.lock().current_size()
    }

    /// Returns a snapshot of every entry's estimated size.
    pub fn item_sizes(&self) -> HashMap<String, u64> {
        self.store.lock().item_sizes().clone()
    }

    /// Returns the most recently set or read key, or None when empty.
    pub fn most_recent_key(&self) -> Option<String> {
        self.store.lock().most_recent_key().map(str::to_string)
    }

    /// Returns a snapshot of the keys from least to most recently used.
    pub fn recency_order(&self) -> Vec<String> {
        self.store.lock().recency_order()
    }

    pub fn max_bytes(&self) -> u64 {
        self.store.lock().max_bytes()
    }

    /// Rolling mean time spent in `get`, in milliseconds.
    pub fn average_get_latency(&self) -> f64 {
        self.store.lock().stats().avg_get_ms
    }

    /// Rolling mean time spent in `set`, in milliseconds.
    pub fn average_set_latency(&self) -> f64 {
        self.store.lock().stats().avg_set_ms
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    /// Toggles logging of size and recency order after each eviction pass.
    pub fn set_verbose(&self, verbose: bool) {
        self.store.lock().set_verbose(verbose);
    }
}

impl<V: SizeEstimable + Clone> AccessCache<V> {
    // == Set ==
    /// Stores a value under `key`, evicting least recently used entries as
    /// needed to stay within budget.
    ///
    /// Fails with `CapacityExceeded` when the value alone is at least as
    /// large as the budget; the cache is left unchanged in that case.
    pub fn set(&self, key: impl Into<String>, value: V) -> Result<()> {
        let start = Instant::now();
        let key = key.into();
        let size = estimate_size(&value)?;

        let mut store = self.store.lock();
        store.insert(key, value, size)?;
        store.record_set(start.elapsed());
        Ok(())
    }

    // == Get ==
    /// Returns a clone of the value under `key` and marks it most recently used.
    pub fn get(&self, key: &str) -> Option<V> {
        let start = Instant::now();

        let mut store = self.store.lock();
        let value = store.get(key).cloned();
        store.record_get(value.is_some(), start.elapsed());
        value
    }
}

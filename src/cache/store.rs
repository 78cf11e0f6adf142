//! Cache Store Module
//!
//! Byte-bounded storage combining the value map, the size table and the
//! recency list. Not synchronized; `AccessCache` owns one behind a mutex.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::{CacheStats, RecencyList};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Cache storage with byte-budget LRU eviction.
///
/// `entries`, `sizes` and `recency` always hold the same key set, and the
/// summed sizes never exceed `max_bytes` once an operation returns.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, V>,
    /// Estimated size of each entry in bytes
    sizes: HashMap<String, u64>,
    /// Access order, oldest first
    recency: RecencyList,
    /// Performance statistics
    stats: CacheStats,
    /// Byte budget, fixed for the store's lifetime
    max_bytes: u64,
    /// Log size and order after every eviction pass
    verbose: bool,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store with the given byte budget.
    ///
    /// A zero budget is a configuration error.
    pub fn new(max_bytes: u64) -> Result<Self> {
        if max_bytes == 0 {
            return Err(CacheError::InvalidConfig(
                "Size in bytes must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            entries: HashMap::new(),
            sizes: HashMap::new(),
            recency: RecencyList::new(),
            stats: CacheStats::new(),
            max_bytes,
            verbose: false,
        })
    }

    // == Insert ==
    /// Stores a value whose estimated size is `size`.
    ///
    /// Values at least as large as the whole budget are rejected without
    /// touching the store. Otherwise the key becomes the most recently used,
    /// any previous value is replaced, and least recently used entries are
    /// evicted until the store fits its budget again.
    pub fn insert(&mut self, key: String, value: V, size: u64) -> Result<()> {
        if size >= self.max_bytes {
            debug!(key = %key, size, max_bytes = self.max_bytes, "Rejected oversized entry");
            return Err(CacheError::CapacityExceeded {
                key,
                size,
                max_bytes: self.max_bytes,
            });
        }

        self.recency.promote(&key);
        self.sizes.insert(key.clone(), size);
        self.entries.insert(key, value);

        self.evict_to_budget();
        Ok(())
    }

    // == Get ==
    /// Looks up a value, promoting its key on a hit.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let value = self.entries.get(key)?;
        self.recency.promote(key);
        Some(value)
    }

    // == Eviction ==
    /// Drops least recently used entries while the store is over budget.
    fn evict_to_budget(&mut self) {
        while self.current_size() > self.max_bytes {
            // Unreachable while insert rejects oversized values
            let Some(oldest) = self.recency.evict_oldest() else {
                break;
            };

            self.entries.remove(&oldest);
            let size = self.sizes.remove(&oldest).unwrap_or(0);
            self.stats.record_eviction();
            debug!(key = %oldest, size, "Evicted least recently used entry");
        }

        if self.verbose {
            info!(
                size = self.current_size(),
                order = ?self.recency_order(),
                "Eviction pass complete"
            );
        }
    }

    // == Accessors ==
    /// Returns the number of cached keys.
    pub fn count(&self) -> usize {
        self.recency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recency.is_empty()
    }

    /// Returns the summed size of all entries, recomputed on every call.
    pub fn current_size(&self) -> u64 {
        self.sizes.values().sum()
    }

    /// Returns the estimated size of every entry.
    pub fn item_sizes(&self) -> &HashMap<String, u64> {
        &self.sizes
    }

    /// Returns the most recently used key.
    pub fn most_recent_key(&self) -> Option<&str> {
        self.recency.newest()
    }

    /// Returns all keys from least to most recently used.
    pub fn recency_order(&self) -> Vec<String> {
        self.recency.iter().map(str::to_string).collect()
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    // == Stats ==
    /// Folds a completed get into the statistics.
    pub fn record_get(&mut self, hit: bool, elapsed: Duration) {
        self.stats.record_get(hit, elapsed);
    }

    /// Folds a completed set into the statistics.
    pub fn record_set(&mut self, elapsed: Duration) {
        self.stats.record_set(elapsed);
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.count();
        stats.current_bytes = self.current_size();
        stats.max_bytes = self.max_bytes;
        stats
    }
}

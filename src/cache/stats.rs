//! Cache Statistics Module
//!
//! Tracks hits, misses, evictions and rolling get/set latencies.

use std::time::Duration;

use serde::Serialize;

// == Cache Stats ==
/// Cache performance metrics.
///
/// The live counters sit inside the locked store; callers get a copy via
/// `AccessCache::stats`, with the size fields filled in at snapshot time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of gets that found their key
    pub hits: u64,
    /// Number of gets that did not
    pub misses: u64,
    /// Number of entries evicted to stay within budget
    pub evictions: u64,
    /// Number of completed get calls
    pub get_count: u64,
    /// Number of completed set calls
    pub set_count: u64,
    /// Rolling mean get duration in milliseconds
    pub avg_get_ms: f64,
    /// Rolling mean set duration in milliseconds
    pub avg_set_ms: f64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Current estimated size of all entries in bytes
    pub current_bytes: u64,
    /// Byte budget of the cache
    pub max_bytes: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Get ==
    /// Records a completed get and folds its duration into the average.
    pub fn record_get(&mut self, hit: bool, elapsed: Duration) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        self.avg_get_ms = rolling_average(self.avg_get_ms, self.get_count, elapsed);
        self.get_count += 1;
    }

    // == Record Set ==
    /// Records a completed set and folds its duration into the average.
    pub fn record_set(&mut self, elapsed: Duration) {
        self.avg_set_ms = rolling_average(self.avg_set_ms, self.set_count, elapsed);
        self.set_count += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

/// Weights the new sample against `count` earlier ones, in milliseconds.
fn rolling_average(current: f64, count: u64, sample: Duration) -> f64 {
    let sample_ms = sample.as_secs_f64() * 1000.0;
    (current * count as f64 + sample_ms) / (count as f64 + 1.0)
}

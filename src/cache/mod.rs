//! Cache Module
//!
//! Provides the byte-bounded LRU store and its thread-safe handle.

mod access_cache;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use access_cache::AccessCache;
pub use recency::RecencyList;
pub use stats::CacheStats;
pub use store::CacheStore;

//! Error types for the access cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its size estimator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A single value is at least as large as the whole cache budget
    #[error("Cannot add '{key}': {size} bytes does not fit a cache of {max_bytes} bytes")]
    CapacityExceeded {
        key: String,
        size: u64,
        max_bytes: u64,
    },

    /// The cache was configured with an unusable budget
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Size estimation recursed past the depth guard (usually a cycle)
    #[error("Size estimation recursed more than {0} levels")]
    DepthExceeded(usize),

    /// Size estimation could not inspect a value
    #[error("Cannot measure value: {0}")]
    Unmeasurable(String),
}

// == Result Type Alias ==
/// Convenience Result type for the access cache.
pub type Result<T> = std::result::Result<T, CacheError>;

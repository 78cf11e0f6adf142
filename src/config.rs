//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;

use crate::error::{CacheError, Result};

/// Budget used when `CACHE_MAX_BYTES` is unset or unparsable (25 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 25 * 1024 * 1024;

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum estimated size of all cached values, in bytes
    pub max_bytes: u64,
    /// Log size and recency order after every eviction pass
    pub verbose: bool,
}

impl Config {
    /// Creates a quiet configuration with the given byte budget.
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            verbose: false,
        }
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_BYTES` - Byte budget (default: 25 MiB)
    /// - `CACHE_VERBOSE` - `1`/`true` to log every eviction pass (default: off)
    pub fn from_env() -> Self {
        Self {
            max_bytes: env::var("CACHE_MAX_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_BYTES),
            verbose: env::var("CACHE_VERBOSE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// Rejects a zero budget. The cache never clamps it to a default.
    pub fn validate(&self) -> Result<()> {
        if self.max_bytes == 0 {
            return Err(CacheError::InvalidConfig(
                "Size in bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BYTES)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

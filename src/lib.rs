//! Access Cache - a byte-bounded in-process cache
//!
//! Keeps the most recently accessed values while the estimated size of all
//! values stays under a fixed budget.

pub mod cache;
pub mod config;
pub mod error;
pub mod size;

pub use cache::{AccessCache, CacheStats};
pub use config::Config;
pub use error::{CacheError, Result};
pub use size::{estimate_size, estimate_total, Placement, SizeEstimable, MAX_DEPTH};

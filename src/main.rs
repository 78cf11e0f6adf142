//! Access Cache demo
//!
//! Walks through a short set/get sequence on a small cache and logs which
//! key is most recent and how large the cache is after each step.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use access_cache::{AccessCache, Config};

/// Budget small enough that the third string pushes out the least recently used one.
const DEMO_MAX_BYTES: u64 = 100;

/// Entry point for the demo.
///
/// `CACHE_VERBOSE` is honored; the budget is fixed at `DEMO_MAX_BYTES` so the
/// walkthrough always evicts.
fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "access_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config {
        max_bytes: DEMO_MAX_BYTES,
        ..Config::from_env()
    };
    info!(
        "Configuration loaded: max_bytes={}, verbose={}",
        config.max_bytes, config.verbose
    );

    let cache: AccessCache<String> =
        AccessCache::from_config(&config).context("failed to create cache")?;

    cache
        .set("key-a", "first string".to_string())
        .context("failed to store key-a")?;
    report(&cache, "Added first item");

    cache
        .set("key-b", "second string".to_string())
        .context("failed to store key-b")?;
    report(&cache, "Added second item");

    cache.get("key-a");
    report(&cache, "Read first item");

    // Pushes the cache over budget, so key-b (least recently used) goes
    cache
        .set("key-c", "third string".to_string())
        .context("failed to store key-c")?;
    report(&cache, "Added third item");

    cache.get("key-a");
    report(&cache, "Read first item again");

    let stats = serde_json::to_string_pretty(&cache.stats()).context("failed to encode stats")?;
    info!("Final stats:\n{}", stats);

    Ok(())
}

fn report(cache: &AccessCache<String>, step: &str) {
    info!(
        "{}: most recent={}, size={} bytes, order={:?}",
        step,
        cache.most_recent_key().unwrap_or_default(),
        cache.current_size(),
        cache.recency_order()
    );
}

//! Mini LRU - demonstration driver
//!
//! Builds a cache from the environment, runs a short put/get sequence that
//! triggers one eviction, and prints the resulting statistics as JSON.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_lru::{Config, LruCache};

/// Entry point for the demonstration.
///
/// # Sequence
/// 1. Load configuration from environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Insert three keys, read one, insert a fourth (evicting the oldest)
/// 4. Read the evicted key back and report statistics
fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    // Defaults to the configured filter, can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mini LRU demonstration");
    info!("Configuration loaded: capacity={}", config.capacity);

    let cache: LruCache<u32, String> =
        LruCache::from_config(&config).context("failed to create cache")?;

    for (key, value) in [(1, "A"), (2, "B"), (3, "C")] {
        cache.put(key, value.to_string());
        info!("put({}, {:?})", key, value);
    }

    info!("get(2) -> {:?}", cache.get(&2));

    cache.put(4, "D".to_string());
    info!("put(4, \"D\"), recency order now {:?}", cache.keys());

    for key in [1, 3, 4] {
        info!("get({}) -> {:?}", key, cache.get(&key));
    }

    let stats = serde_json::to_string_pretty(&cache.stats()).context("failed to encode stats")?;
    println!("{}", stats);

    info!("Demonstration complete");
    Ok(())
}

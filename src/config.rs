//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;

use crate::error::{CacheError, Result};

/// Environment variable holding the cache capacity
pub const CAPACITY_VAR: &str = "LRU_CAPACITY";

/// Environment variable holding the default log filter
pub const LOG_FILTER_VAR: &str = "LRU_LOG";

const DEFAULT_CAPACITY: usize = 3;
const DEFAULT_LOG_FILTER: &str = "mini_lru=info";

/// Cache configuration parameters.
///
/// Only the demonstration binary reads the environment; library users build a
/// `Config` directly or call `LruCache::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LRU_CAPACITY` - Maximum cache entries (default: 3)
    /// - `LRU_LOG` - Log filter directive (default: `mini_lru=info`)
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfig` if `LRU_CAPACITY` is not an integer,
    /// or `CacheError::InvalidCapacity` if it is zero.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let capacity = match lookup(CAPACITY_VAR) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                CacheError::InvalidConfig(format!("{}={}", CAPACITY_VAR, raw))
            })?,
            None => DEFAULT_CAPACITY,
        };
        let log_filter = lookup(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let config = Self {
            capacity,
            log_filter,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that cannot produce a usable cache.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

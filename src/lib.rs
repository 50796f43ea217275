//! Mini LRU - A fixed-capacity, thread-safe in-memory LRU cache
//!
//! Evicts the least recently used entry once a new key would exceed the
//! configured capacity. Lookups and inserts are O(1).

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, CacheStore, LruCache};
pub use config::Config;
pub use error::{CacheError, Result};

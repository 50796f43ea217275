//! Cache Module
//!
//! Provides a fixed-capacity LRU cache built from a key index and an
//! arena-backed recency list, guarded by a single mutex.

mod entry;
mod index;
mod lru;
mod shared;
mod stats;
mod store;


use entry::Entry;
use index::Index;
use lru::{NodeId, RecencyList};

// Re-export public types
pub use shared::LruCache;
pub use stats::CacheStats;
pub use store::CacheStore;

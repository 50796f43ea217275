//! Cache Statistics Module
//!
//! Counters updated by `CacheStore` under the cache lock. Only `get` counts
//! toward hits and misses; `peek` and `contains_key` leave them untouched.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache activity, as returned by `LruCache::stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// `get` calls that found their key
    pub hits: u64,
    /// `get` calls that did not find their key
    pub misses: u64,
    /// Entries dropped to make room for a new key
    pub evictions: u64,
    /// New keys stored by `put` (overwrites are not counted)
    pub inserts: u64,
    /// Live entries at the time of the snapshot
    pub total_entries: usize,
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of `get` calls.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }

    // == Recording ==
    /// Counts a `get` that found its key.
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Counts a `get` that missed.
    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Counts an entry evicted by the LRU policy.
    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Counts a newly created entry.
    pub(crate) fn record_insert(&mut self) {
        self.inserts += 1;
    }

    /// Stamps the live entry count onto a snapshot.
    pub(crate) fn with_total_entries(mut self, count: usize) -> Self {
        self.total_entries = count;
        self
    }
}

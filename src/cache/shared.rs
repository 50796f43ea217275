//! Shared Cache Module
//!
//! Thread-safe facade over `CacheStore`.
//!
//! A single `parking_lot::Mutex` guards the index and the recency list
//! together, so every operation is one critical section. `get` takes the same
//! exclusive lock as `put` because reading refreshes recency order. The guard
//! is released when it goes out of scope, including on early return and
//! during unwinding, and parking_lot locks are never poisoned.

use std::borrow::Borrow;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::info;

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::Result;

// == LRU Cache ==
/// Fixed-capacity LRU cache safe to share between threads.
///
/// Share it with `Arc<LruCache<K, V>>`; all methods take `&self`.
///
/// # Example
/// ```
/// use mini_lru::LruCache;
///
/// let cache = LruCache::new(2).unwrap();
/// cache.put(1, "A");
/// cache.put(2, "B");
/// assert_eq!(cache.get(&1), Some("A"));
///
/// cache.put(3, "C"); // evicts 2, the least recently used
/// assert_eq!(cache.get(&2), None);
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    inner: Mutex<CacheStore<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(CacheStore::new(capacity)?),
        })
    }

    /// Creates a cache sized by `config`.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` if `config.capacity` is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Self::new(config.capacity)?;
        info!(capacity = config.capacity, "LRU cache initialized");
        Ok(cache)
    }

    // == Get ==
    /// Returns a copy of the value for `key` and marks it most recently used.
    ///
    /// A miss returns None and is not an error.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    // == Put ==
    /// Inserts or overwrites `key`, evicting the least recently used entry
    /// when a new key would exceed capacity.
    pub fn put(&self, key: K, value: V) {
        // Evicted pair is dropped after the guard is released
        let _evicted = self.inner.lock().put(key, value);
    }

    // == Remove ==
    /// Removes `key` from the cache, returning its value.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().remove(key)
    }

    // == Peek ==
    /// Returns a copy of the value for `key` without refreshing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Returns true if `key` is cached, without refreshing its recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains_key(key)
    }

    /// Returns a snapshot of the keys from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().keys().cloned().collect()
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the maximum number of entries, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Drops every entry. Statistics are kept.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    // == Stats ==
    /// Returns a snapshot of hit, miss, eviction and insert counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.inner.lock().assert_consistent();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use std::sync::Arc;
    use std::thread;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_cache_is_send_and_sync() {
        assert_send_sync::<LruCache<String, String>>();
        assert_send_sync::<Arc<LruCache<u64, Vec<u8>>>>();
    }

    #[test]
    fn test_cache_zero_capacity() {
        let result = LruCache::<u32, u32>::new(0);
        assert!(matches!(result, Err(CacheError::InvalidCapacity(0))));
    }

    #[test]
    fn test_cache_from_config() {
        let config = Config {
            capacity: 5,
            ..Config::default()
        };
        let cache = LruCache::<u32, u32>::from_config(&config).unwrap();
        assert_eq!(cache.capacity(), 5);

        // A hand-built config skips `Config::validate`; construction still rejects it
        let bad = Config {
            capacity: 0,
            ..Config::default()
        };
        let result = LruCache::<u32, u32>::from_config(&bad);
        assert!(matches!(result, Err(CacheError::InvalidCapacity(0))));
    }

    #[test]
    fn test_cache_scenario() {
        let cache = LruCache::new(3).unwrap();

        cache.put(1, "A".to_string());
        cache.put(2, "B".to_string());
        cache.put(3, "C".to_string());
        assert_eq!(cache.get(&2), Some("B".to_string()));

        // 1 was never re-accessed, so it is evicted
        cache.put(4, "D".to_string());

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&3), Some("C".to_string()));
        assert_eq!(cache.get(&4), Some("D".to_string()));
        assert_eq!(cache.len(), 3);
        cache.assert_consistent();
    }

    #[test]
    fn test_cache_str_lookup_for_string_keys() {
        let cache = LruCache::new(2).unwrap();

        cache.put("alpha".to_string(), 1);
        assert_eq!(cache.get("alpha"), Some(1));
        assert!(cache.contains_key("alpha"));
        assert_eq!(cache.remove("alpha"), Some(1));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_peek_and_keys() {
        let cache = LruCache::new(3).unwrap();

        cache.put('a', 1);
        cache.put('b', 2);
        cache.put('c', 3);

        assert_eq!(cache.peek(&'a'), Some(1));
        assert_eq!(cache.keys(), vec!['c', 'b', 'a']);

        cache.get(&'a');
        assert_eq!(cache.keys(), vec!['a', 'c', 'b']);
    }

    #[test]
    fn test_cache_clear_keeps_stats() {
        let cache = LruCache::new(2).unwrap();

        cache.put(1, 1);
        cache.get(&1);
        cache.clear();

        assert!(cache.is_empty());
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_cache_concurrent_puts_respect_capacity() {
        let cache = Arc::new(LruCache::new(16).unwrap());

        let handles: Vec<_> = (0..8u64)
            .map(|worker| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..500u64 {
                        cache.put(worker * 1000 + i, i);
                        cache.get(&(worker * 1000 + i / 2));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 16);
        assert_eq!(cache.stats().inserts, 8 * 500);
        cache.assert_consistent();
    }
}

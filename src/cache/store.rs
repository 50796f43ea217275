//! Cache Store Module
//!
//! Unsynchronized LRU engine combining the key index with the recency list.
//! `LruCache` wraps a `CacheStore` in a mutex; use the store directly only
//! when the caller already provides exclusive access.

use std::borrow::Borrow;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::cache::{CacheStats, Index, RecencyList};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Fixed-capacity LRU storage.
///
/// The index and the recency list always hold the same set of keys once a
/// method returns, and that set never grows past `capacity`.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key to node-handle lookup
    index: Index<K>,
    /// Owns every entry, ordered by recency
    list: RecencyList<K, V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        debug!(capacity, "Creating LRU cache store");
        Ok(Self {
            index: Index::with_capacity(capacity),
            list: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Get ==
    /// Retrieves a value by key and marks it as most recently used.
    ///
    /// Returns None on a miss; a miss leaves the order of existing entries
    /// untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(id) => {
                trace!("Cache hit");
                self.stats.record_hit();
                self.list.move_to_front(id);
                self.list.entry(id).map(|entry| &entry.value)
            }
            None => {
                trace!("Cache miss");
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores a key-value pair as the most recently used entry.
    ///
    /// If the key already exists, its value is overwritten in place and no
    /// eviction happens. Otherwise, if the cache is at capacity, the least
    /// recently used entry is evicted first and returned.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(id) = self.index.get(&key) {
            if let Some(entry) = self.list.entry_mut(id) {
                entry.replace_value(value);
            }
            self.list.move_to_front(id);
            return None;
        }

        let evicted = if self.index.len() >= self.capacity {
            self.evict_lru()
        } else {
            None
        };

        let id = self.list.push_front(key.clone(), value);
        self.index.insert(key, id);
        self.stats.record_insert();

        evicted
    }

    // == Remove ==
    /// Removes an entry by key, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.remove(key)?;
        self.list.remove(id);
        self.list.release(id).map(|entry| entry.value)
    }

    // == Peek ==
    /// Retrieves a value without refreshing its recency or touching stats.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.get(key)?;
        self.list.entry(id).map(|entry| &entry.value)
    }

    /// Returns the least recently used entry, the next eviction candidate.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.peek_last().map(|entry| (&entry.key, &entry.value))
    }

    /// Checks membership without refreshing recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Evict ==
    /// Drops the least recently used entry from both the list and the index.
    fn evict_lru(&mut self) -> Option<(K, V)> {
        let id = self.list.remove_last()?;
        let entry = self.list.release(id)?;
        self.index.remove(&entry.key);
        self.stats.record_eviction();

        debug!(
            remaining = self.index.len(),
            capacity = self.capacity,
            "Evicted least recently used entry"
        );
        Some(entry.into_pair())
    }

    // == Clear ==
    /// Drops every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
        debug!("Cache store cleared");
    }

    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.list.iter().map(|entry| &entry.key)
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone().with_total_entries(self.index.len())
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks that the index and the recency list agree on the live key set
    /// and that the size bound holds.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.list.assert_links_consistent();

        assert_eq!(self.index.len(), self.list.len(), "index and list sizes differ");
        assert!(self.index.len() <= self.capacity, "size exceeds capacity");

        for entry in self.list.iter() {
            let indexed = self
                .index
                .get(&entry.key)
                .and_then(|id| self.list.entry(id));
            assert!(
                indexed.map_or(false, |found| found.key == entry.key),
                "listed key is missing from the index"
            );
        }
        for key in self.index.keys() {
            assert!(
                self.list.iter().any(|entry| &entry.key == key),
                "indexed key is missing from the list"
            );
        }
    }
}

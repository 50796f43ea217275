//! Cache Entry Module
//!
//! Defines the key-value pair stored in each recency list node.

// == Cache Entry ==
/// A single cache entry: the key it is indexed under and its value.
///
/// The key is kept alongside the value so that evicting the least recently
/// used node can also drop its key from the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<K, V> {
    /// The key this entry is stored under
    pub key: K,
    /// The stored value
    pub value: V,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates a new entry.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    // == Replace Value ==
    /// Overwrites the value in place, returning the previous one.
    pub fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    /// Splits the entry into its key and value.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

//! Index Module
//!
//! Maps each live key to the handle of the recency list node holding it.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::NodeId;

// == Index ==
/// Key to node-handle mapping.
///
/// The index never owns entries; it only records where in the recency list
/// each key's node lives.
#[derive(Debug)]
pub(crate) struct Index<K> {
    handles: HashMap<K, NodeId>,
}

impl<K: Hash + Eq> Index<K> {
    /// Creates an index sized for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            handles: HashMap::with_capacity(capacity),
        }
    }

    /// Returns true if `key` has a live node.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.handles.contains_key(key)
    }

    /// Returns the handle of the node holding `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.handles.get(key).copied()
    }

    /// Inserts or overwrites the mapping for `key`.
    pub fn insert(&mut self, key: K, id: NodeId) -> Option<NodeId> {
        self.handles.insert(key, id)
    }

    /// Deletes the mapping for `key`; a no-op if it is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.handles.remove(key)
    }

    /// Returns the number of indexed keys.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns true if no keys are indexed.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Drops every mapping.
    pub fn clear(&mut self) {
        self.handles.clear();
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.handles.keys()
    }
}

//! Recency List Module
//!
//! Doubly-linked list ordering live entries from most to least recently used.
//!
//! Nodes live in an arena and are addressed by stable `NodeId` handles, so
//! `prev`/`next` links are plain indices rather than references. Two sentinel
//! nodes anchor the front and back of the list and never hold an entry, which
//! removes every empty-list and single-element special case from the linking
//! code.

use crate::cache::Entry;

// Sentinel slots, allocated once and never freed
const HEAD: usize = 0;
const TAIL: usize = 1;

// Link value of a node that is allocated but not currently in the list
const DETACHED: usize = usize::MAX;

// == Node Handle ==
/// Stable handle to a node in the recency list arena.
///
/// Handles are only produced by `RecencyList::push_front` and stay valid until
/// the node is passed to `RecencyList::release`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug)]
struct Node<K, V> {
    entry: Option<Entry<K, V>>,
    prev: usize,
    next: usize,
}

impl<K, V> Node<K, V> {
    fn sentinel() -> Self {
        Self {
            entry: None,
            prev: HEAD,
            next: TAIL,
        }
    }
}

// == Recency List ==
/// Arena-backed doubly-linked list with front and back sentinels.
///
/// - Front (after `HEAD`) = Most recently used
/// - Back (before `TAIL`) = Least recently used
///
/// The list never frees a node on its own: `remove` and `remove_last` only
/// unlink, and the caller decides when to `release` the slot.
#[derive(Debug)]
pub(crate) struct RecencyList<K, V> {
    nodes: Vec<Node<K, V>>,
    /// Released slots available for reuse
    free: Vec<usize>,
    /// Number of nodes currently linked between the sentinels
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates an empty list holding only the two sentinels.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries before the
    /// arena has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(2));
        nodes.push(Node::sentinel());
        nodes.push(Node::sentinel());
        Self {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    // == Push Front ==
    /// Allocates a node for `(key, value)` and links it as most recently used.
    pub fn push_front(&mut self, key: K, value: V) -> NodeId {
        let node = Node {
            entry: Some(Entry::new(key, value)),
            prev: DETACHED,
            next: DETACHED,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        let id = NodeId(idx);
        self.add_to_front(id);
        id
    }

    // == Add To Front ==
    /// Links a detached node immediately after the front sentinel.
    ///
    /// # Panics
    /// Panics if the node is already linked or has been released.
    pub fn add_to_front(&mut self, id: NodeId) {
        let idx = id.0;
        assert!(self.is_detached(idx), "node {} is not a detached entry", idx);

        let first = self.nodes[HEAD].next;
        self.nodes[idx].prev = HEAD;
        self.nodes[idx].next = first;
        self.nodes[first].prev = idx;
        self.nodes[HEAD].next = idx;
        self.len += 1;
    }

    // == Remove ==
    /// Splices a linked node out of the list by joining its neighbours.
    ///
    /// The node stays allocated; pass it to `add_to_front` to relink it or to
    /// `release` to free it.
    ///
    /// # Panics
    /// Panics if the node is not linked.
    pub fn remove(&mut self, id: NodeId) {
        let idx = id.0;
        assert!(self.is_linked(idx), "node {} is not linked", idx);

        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[idx].prev = DETACHED;
        self.nodes[idx].next = DETACHED;
        self.len -= 1;
    }

    // == Move To Front ==
    /// Marks a linked node as most recently used.
    pub fn move_to_front(&mut self, id: NodeId) {
        if self.nodes[HEAD].next == id.0 {
            return;
        }
        self.remove(id);
        self.add_to_front(id);
    }

    // == Remove Last ==
    /// Unlinks and returns the least recently used node.
    ///
    /// Returns None if the list is empty.
    pub fn remove_last(&mut self) -> Option<NodeId> {
        let last = self.nodes[TAIL].prev;
        if last == HEAD {
            return None;
        }
        let id = NodeId(last);
        self.remove(id);
        Some(id)
    }

    // == Release ==
    /// Frees a detached node's slot and hands back its entry.
    ///
    /// Returns None, and frees nothing, if the node is still linked or was
    /// already released.
    pub fn release(&mut self, id: NodeId) -> Option<Entry<K, V>> {
        let idx = id.0;
        if !self.is_detached(idx) {
            return None;
        }

        let entry = self.nodes[idx].entry.take()?;
        self.free.push(idx);
        Some(entry)
    }

    // == Accessors ==
    /// Returns the entry held by a node.
    pub fn entry(&self, id: NodeId) -> Option<&Entry<K, V>> {
        self.nodes.get(id.0).and_then(|node| node.entry.as_ref())
    }

    /// Returns the entry held by a node, mutably.
    pub fn entry_mut(&mut self, id: NodeId) -> Option<&mut Entry<K, V>> {
        self.nodes.get_mut(id.0).and_then(|node| node.entry.as_mut())
    }

    /// Returns the least recently used entry without unlinking it.
    pub fn peek_last(&self) -> Option<&Entry<K, V>> {
        self.nodes[self.nodes[TAIL].prev].entry.as_ref()
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD].next,
            remaining: self.len,
        }
    }

    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no entries are linked.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node except the sentinels.
    ///
    /// All previously issued handles become invalid.
    pub fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD] = Node::sentinel();
        self.nodes[TAIL] = Node::sentinel();
        self.free.clear();
        self.len = 0;
    }

    fn is_linked(&self, idx: usize) -> bool {
        idx > TAIL && idx < self.nodes.len() && self.nodes[idx].prev != DETACHED
    }

    fn is_detached(&self, idx: usize) -> bool {
        idx > TAIL
            && idx < self.nodes.len()
            && self.nodes[idx].entry.is_some()
            && self.nodes[idx].prev == DETACHED
            && self.nodes[idx].next == DETACHED
    }

    /// Number of arena slots, sentinels included.
    #[cfg(test)]
    pub(crate) fn slots(&self) -> usize {
        self.nodes.len()
    }

    /// Walks the list in both directions and checks that every link agrees
    /// with its neighbour and that both walks see `len` entries.
    #[cfg(test)]
    pub(crate) fn assert_links_consistent(&self) {
        let mut forward = Vec::new();
        let mut idx = self.nodes[HEAD].next;
        while idx != TAIL {
            assert!(forward.len() <= self.len, "forward walk longer than len");
            let node = &self.nodes[idx];
            assert!(node.entry.is_some(), "linked node {} has no entry", idx);
            assert_ne!(node.next, idx, "node {} links to itself", idx);
            assert_eq!(self.nodes[node.next].prev, idx, "broken back link at {}", idx);
            forward.push(idx);
            idx = node.next;
        }

        let mut backward = Vec::new();
        let mut idx = self.nodes[TAIL].prev;
        while idx != HEAD {
            assert!(backward.len() <= self.len, "backward walk longer than len");
            backward.push(idx);
            idx = self.nodes[idx].prev;
        }
        backward.reverse();

        assert_eq!(forward, backward);
        assert_eq!(forward.len(), self.len);
    }
}

// == Iterator ==
/// Iterator over entries from most to least recently used.
pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL || self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.cursor];
        self.cursor = node.next;
        self.remaining -= 1;
        node.entry.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

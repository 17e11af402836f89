//! Thread-safe ring handle.
//!
//! [`SharedRing`] is the read-mostly structure that routers share across
//! threads. Membership changes take the write lock, lookups take the read
//! lock, so a reader sees either the ring before an `add_node`/`remove_node`
//! or the ring after it, never a ring with some replicas applied.

use std::fmt;
use std::sync::RwLock;

use conring_types::NodeId;

use crate::hash::RingHasher;
use crate::ring::Ring;

/// A [`Ring`] behind a `RwLock`, shareable via `Arc`.
pub struct SharedRing<H> {
    ring: RwLock<Ring<H>>,
}

impl<H: RingHasher> SharedRing<H> {
    /// Wrap an existing ring.
    pub fn new(ring: Ring<H>) -> Self {
        Self {
            ring: RwLock::new(ring),
        }
    }

    /// Add a node (exclusive access).
    pub fn add_node(&self, node: impl Into<NodeId>) {
        let mut ring = self.ring.write().expect("ring lock poisoned");
        ring.add_node(node);
    }

    /// Remove a node (exclusive access).
    pub fn remove_node(&self, node: impl AsRef<str>) {
        let mut ring = self.ring.write().expect("ring lock poisoned");
        ring.remove_node(node);
    }

    /// Resolve `key` to its owning node (shared access).
    pub fn get_node(&self, key: impl AsRef<[u8]>) -> Option<NodeId> {
        let ring = self.ring.read().expect("ring lock poisoned");
        ring.get_node(key).cloned()
    }

    /// Run `f` against one consistent view of the ring.
    ///
    /// Use this to resolve a batch of keys without membership changing
    /// between lookups. Writers are blocked while `f` runs.
    pub fn read<R>(&self, f: impl FnOnce(&Ring<H>) -> R) -> R {
        let ring = self.ring.read().expect("ring lock poisoned");
        f(&ring)
    }

    /// Return the number of physical nodes on the ring.
    pub fn node_count(&self) -> usize {
        self.read(|ring| ring.node_count())
    }

    /// Whether `node` is currently on the ring.
    pub fn contains_node(&self, node: impl AsRef<str>) -> bool {
        self.read(|ring| ring.contains_node(node))
    }

    /// Consume the handle, returning the inner ring.
    pub fn into_inner(self) -> Ring<H> {
        self.ring.into_inner().expect("ring lock poisoned")
    }
}

impl<H: RingHasher + Clone> SharedRing<H> {
    /// Return a clone of the current ring.
    pub fn snapshot(&self) -> Ring<H> {
        self.read(|ring| ring.clone())
    }
}

impl<H: RingHasher> From<Ring<H>> for SharedRing<H> {
    fn from(ring: Ring<H>) -> Self {
        Self::new(ring)
    }
}

impl<H> fmt::Debug for SharedRing<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("SharedRing");
        if let Ok(ring) = self.ring.try_read() {
            s.field("node_count", &ring.node_count())
                .field("vnode_count", &ring.vnode_count())
                .field("replicas", &ring.replicas());
        }
        s.finish_non_exhaustive()
    }
}

//! Consistent hashing ring implementation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use conring_types::{HasherKind, NodeId, Position, RingConfig};
use tracing::debug;

use crate::error::RingError;
use crate::hash::{Blake3Hasher, RingHasher};

/// Consistent hashing ring mapping keys to nodes.
///
/// Each node is mapped to `replicas` virtual positions on a u64 circle.
/// A key belongs to the first position at or after its own hash, wrapping
/// to the lowest position when it hashes past the last one.
#[derive(Debug, Clone)]
pub struct Ring<H = Blake3Hasher> {
    /// Virtual replica positions: ring position -> physical node.
    entries: BTreeMap<Position, NodeId>,
    /// Physical nodes currently added.
    nodes: BTreeSet<NodeId>,
    /// Virtual positions generated per node.
    replicas: u16,
    hasher: H,
}

impl Ring<Blake3Hasher> {
    /// Create a new empty ring using the default BLAKE3 placement.
    pub fn new(replicas: u16) -> Result<Self, RingError> {
        Self::with_hasher(replicas, Blake3Hasher)
    }
}

impl Ring<HasherKind> {
    /// Create a new empty ring from configuration.
    pub fn from_config(config: &RingConfig) -> Result<Self, RingError> {
        Self::with_hasher(config.replicas, config.hasher)
    }
}

impl<H: RingHasher> Ring<H> {
    /// Create a new empty ring that places replicas and keys with `hasher`.
    ///
    /// Fails with [`RingError::ZeroReplicas`] if `replicas` is 0.
    pub fn with_hasher(replicas: u16, hasher: H) -> Result<Self, RingError> {
        if replicas == 0 {
            return Err(RingError::ZeroReplicas);
        }
        Ok(Self {
            entries: BTreeMap::new(),
            nodes: BTreeSet::new(),
            replicas,
            hasher,
        })
    }

    /// Create a ring and add every node in `nodes`, in order.
    pub fn with_nodes<I>(replicas: u16, hasher: H, nodes: I) -> Result<Self, RingError>
    where
        I: IntoIterator,
        I::Item: Into<NodeId>,
    {
        let mut ring = Self::with_hasher(replicas, hasher)?;
        for node in nodes {
            ring.add_node(node);
        }
        Ok(ring)
    }

    /// Add a node to the ring.
    ///
    /// Writes one entry per replica at `hash("<node>:<i>")`. If a position is
    /// already taken by another replica the later write wins. Re-adding a
    /// node rewrites the same positions with the same value.
    pub fn add_node(&mut self, node: impl Into<NodeId>) {
        let node = node.into();

        for i in 0..self.replicas {
            let position = self.replica_position(node.as_str(), i);
            if let Some(displaced) = self.entries.insert(position, node.clone()) {
                if displaced != node {
                    debug!(position, %node, %displaced, "replica position collision, overwriting");
                }
            }
        }

        debug!(%node, replicas = self.replicas, "added node to ring");
        self.nodes.insert(node);
    }

    /// Remove a node from the ring.
    ///
    /// Deletes the node's replica positions, skipping any position whose
    /// entry was since overwritten by a different node. Removing a node that
    /// is not on the ring does nothing.
    pub fn remove_node(&mut self, node: impl AsRef<str>) {
        let node = node.as_ref();
        if !self.nodes.remove(node) {
            return;
        }

        let mut removed = 0usize;
        for i in 0..self.replicas {
            let position = self.replica_position(node, i);
            if self
                .entries
                .get(&position)
                .is_some_and(|owner| owner.as_str() == node)
            {
                self.entries.remove(&position);
                removed += 1;
            }
        }

        debug!(node, removed, "removed node from ring");
    }

    /// Return the node that owns `key`, or `None` if the ring is empty.
    pub fn get_node(&self, key: impl AsRef<[u8]>) -> Option<&NodeId> {
        if self.entries.is_empty() {
            return None;
        }
        self.owner_at(self.position_of(key))
    }

    /// Return the node owning `position`: the entry at or clockwise after it.
    pub fn owner_at(&self, position: Position) -> Option<&NodeId> {
        self.entries
            .range(position..)
            .next()
            .or_else(|| self.entries.first_key_value())
            .map(|(_, node)| node)
    }

    /// Hash `key` onto the circle.
    pub fn position_of(&self, key: impl AsRef<[u8]>) -> Position {
        self.hasher.hash(key.as_ref())
    }

    /// The positions `node` occupies (or would occupy) on this ring.
    pub fn replica_positions<'a>(
        &'a self,
        node: &'a str,
    ) -> impl Iterator<Item = Position> + 'a {
        (0..self.replicas).map(move |i| self.replica_position(node, i))
    }

    /// Iterate entries in ascending position order.
    ///
    /// Meant for diagnostics; route keys with [`Ring::get_node`].
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (Position, &NodeId)> {
        self.entries.iter().map(|(position, node)| (*position, node))
    }

    /// Count how many of `keys` resolve to each node.
    ///
    /// Every node on the ring appears in the result, including nodes that
    /// received no keys.
    pub fn load_distribution<I>(&self, keys: I) -> BTreeMap<NodeId, usize>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut distribution: BTreeMap<NodeId, usize> =
            self.nodes.iter().map(|node| (node.clone(), 0)).collect();

        for key in keys {
            if let Some(owner) = self.get_node(key) {
                *distribution.entry(owner.clone()).or_insert(0) += 1;
            }
        }

        distribution
    }

    fn replica_position(&self, node: &str, index: u16) -> Position {
        self.hasher.hash(replica_key(node, index).as_bytes())
    }
}

impl<H> Ring<H> {
    /// Return the number of physical nodes on the ring.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of entries (virtual replicas) on the ring.
    pub fn vnode_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ring has no entries, in which case every lookup is `None`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the configured number of replicas per node.
    pub fn replicas(&self) -> u16 {
        self.replicas
    }

    /// Whether `node` has been added and not removed.
    pub fn contains_node(&self, node: impl AsRef<str>) -> bool {
        self.nodes.contains(node.as_ref())
    }

    /// Return all node IDs on the ring, sorted.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().cloned().collect()
    }

    /// Return the hasher this ring places keys with.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

impl<H> fmt::Display for Ring<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, node) in &self.entries {
            writeln!(f, "Hash: {position} -> Node: {node}")?;
        }
        Ok(())
    }
}

/// Key hashed to place replica `index` of `node`: `"<node>:<index>"`.
fn replica_key(node: &str, index: u16) -> String {
    format!("{node}:{index}")
}

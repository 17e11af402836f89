//! Consistent hashing ring for deterministic key placement.
//!
//! This crate implements a consistent hash ring that maps arbitrary keys to
//! node IDs. Adding or removing a node only remaps the keys adjacent to that
//! node's positions; every other key keeps its owner.
//!
//! The ring uses virtual replicas: each physical node gets `replicas`
//! positions on a u64 circle, determined by `hash("<node>:<i>")`.
//! More replicas per node = more uniform distribution.
//!
//! ```
//! use conring_ring::Ring;
//!
//! let mut ring = Ring::new(3).unwrap();
//! ring.add_node("Node1");
//! ring.add_node("Node2");
//!
//! let owner = ring.get_node("Key1").unwrap();
//! assert!(owner == "Node1" || owner == "Node2");
//! ```
//!
//! - [`Ring`]: the ring itself, single-threaded.
//! - [`SharedRing`]: a `RwLock`-guarded handle for concurrent routers.
//! - [`RingHasher`]: the hash seam; [`Blake3Hasher`] is the default.

mod error;
pub mod hash;
mod ring;
mod shared;

pub use error::RingError;
pub use hash::{Blake3Hasher, FnHasher, RingHasher, Xxh64Hasher};
pub use ring::Ring;
pub use shared::SharedRing;

pub use conring_types::{HasherKind, NodeId, Position, RingConfig};

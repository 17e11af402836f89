//! Shared types and identifiers for conring.
//!
//! This crate defines the types used across the conring workspace:
//! the ring coordinate ([`Position`]), the physical node identifier
//! ([`NodeId`]), and configuration ([`RingConfig`], [`HasherKind`]).

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Ring coordinates
// ---------------------------------------------------------------------------

/// A point on the hash circle.
///
/// Positions are ordered numerically; `u64::MAX` wraps around to `0`.
pub type Position = u64;

// ---------------------------------------------------------------------------
// ID types
// ---------------------------------------------------------------------------

/// Opaque identifier for a physical node on the ring.
///
/// The identifier is used verbatim to build replica keys (`"<node>:<i>"`),
/// so two nodes with the same string are the same node.
#[derive(Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node identifier from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default number of virtual replicas per physical node.
pub const DEFAULT_REPLICAS: u16 = 128;

/// Which hash function places keys and replicas on the circle.
///
/// Both choices are stable across processes and platforms, so a ring
/// rebuilt from the same node list routes keys identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    /// First 8 bytes of BLAKE3, little-endian.
    #[default]
    Blake3,
    /// xxHash64 with seed 0.
    Xxh64,
}

impl fmt::Display for HasherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blake3 => f.write_str("blake3"),
            Self::Xxh64 => f.write_str("xxh64"),
        }
    }
}

/// Construction parameters for a ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Virtual replicas generated per physical node. Must be at least 1.
    pub replicas: u16,
    /// Hash function used for both replica keys and lookup keys.
    pub hasher: HasherKind,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            hasher: HasherKind::default(),
        }
    }
}

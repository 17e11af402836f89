//! Hash functions that place replicas and keys on the circle.
//!
//! The ring only needs a deterministic, reasonably uniform map from bytes to
//! a [`Position`]. [`Blake3Hasher`] is the default; [`Xxh64Hasher`] is
//! cheaper on the lookup path; [`FnHasher`] lets tests pin positions exactly.

use std::fmt;
use std::hash::Hasher;

use conring_types::{HasherKind, Position};
use twox_hash::XxHash64;

/// Maps arbitrary bytes onto the ring's position space.
///
/// Implementations must be deterministic: the same input has to produce the
/// same position on every call, otherwise `remove_node` cannot find the
/// entries `add_node` created.
pub trait RingHasher {
    /// Hash `bytes` to a position on the circle.
    fn hash(&self, bytes: &[u8]) -> Position;
}

/// BLAKE3 truncated to its first 8 bytes (little-endian).
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl RingHasher for Blake3Hasher {
    fn hash(&self, bytes: &[u8]) -> Position {
        let digest = blake3::hash(bytes);
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }
}

/// xxHash64 with a zero seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xxh64Hasher;

impl RingHasher for Xxh64Hasher {
    fn hash(&self, bytes: &[u8]) -> Position {
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(bytes);
        hasher.finish()
    }
}

/// Adapter turning a plain function or closure into a [`RingHasher`].
///
/// ```
/// use conring_ring::{FnHasher, Ring};
///
/// let hasher = FnHasher(|bytes: &[u8]| bytes.len() as u64);
/// let mut ring = Ring::with_hasher(1, hasher).unwrap();
/// ring.add_node("a");
/// assert_eq!(ring.entries().next().map(|(pos, _)| pos), Some(3)); // "a:0"
/// ```
#[derive(Clone, Copy)]
pub struct FnHasher<F>(pub F);

impl<F> fmt::Debug for FnHasher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnHasher(..)")
    }
}

impl<F> RingHasher for FnHasher<F>
where
    F: Fn(&[u8]) -> Position,
{
    fn hash(&self, bytes: &[u8]) -> Position {
        (self.0)(bytes)
    }
}

impl RingHasher for HasherKind {
    fn hash(&self, bytes: &[u8]) -> Position {
        match self {
            HasherKind::Blake3 => Blake3Hasher.hash(bytes),
            HasherKind::Xxh64 => Xxh64Hasher.hash(bytes),
        }
    }
}

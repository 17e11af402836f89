//! Error types for ring construction.

/// Errors that can occur when building a ring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    /// A ring with zero replicas per node can never route a key.
    #[error("replica count must be at least 1")]
    ZeroReplicas,
}

//! Integration test: membership changes only move the keys they must.

use conring_integration_tests::{STAT_REPLICAS, node_names, owners, ring_with, sample_keys};
use conring_ring::{Blake3Hasher, HasherKind, NodeId, Xxh64Hasher};

/// Removing any single node leaves every key it did not own in place,
/// and every key it did own lands on a surviving node.
#[test]
fn test_remove_each_node_moves_only_its_keys() {
    let nodes = node_names("server", 5);
    let keys = sample_keys(5_000);

    for victim in &nodes {
        let mut ring = ring_with(STAT_REPLICAS, Blake3Hasher, &nodes);
        let before = owners(&ring, &keys);

        ring.remove_node(victim);
        let after = owners(&ring, &keys);

        for ((key, b), a) in keys.iter().zip(&before).zip(&after) {
            let b = b.as_ref().unwrap();
            let a = a.as_ref().unwrap();
            if b == victim.as_str() {
                assert_ne!(a, victim.as_str(), "{key} still routes to removed {victim}");
            } else {
                assert_eq!(a, b, "{key} moved off surviving node {b}");
            }
        }
    }
}

/// Adding a node only steals keys for itself.
#[test]
fn test_add_node_only_moves_keys_to_newcomer() {
    let nodes = node_names("server", 4);
    let keys = sample_keys(5_000);
    let mut ring = ring_with(STAT_REPLICAS, Xxh64Hasher, &nodes);
    let before = owners(&ring, &keys);

    ring.add_node("server-new");
    let after = owners(&ring, &keys);

    let mut moved = 0usize;
    for (b, a) in before.iter().zip(&after) {
        if b != a {
            assert_eq!(a.as_ref().unwrap(), "server-new");
            moved += 1;
        }
    }

    // Expect roughly 1/5 of keys to move to the fifth node.
    let ratio = moved as f64 / keys.len() as f64;
    assert!(
        (0.05..=0.45).contains(&ratio),
        "unexpected share moved to newcomer: {moved} ({ratio:.2})"
    );
}

/// Remove then re-add restores the exact original placement.
#[test]
fn test_remove_and_readd_restores_placement() {
    let nodes = node_names("cache", 6);
    let keys = sample_keys(2_000);
    let mut ring = ring_with(64, HasherKind::Blake3, &nodes);
    let original = owners(&ring, &keys);

    ring.remove_node("cache-3");
    ring.add_node("cache-3");

    assert_eq!(owners(&ring, &keys), original);
}

/// Re-adding a present node changes nothing.
#[test]
fn test_idempotent_add() {
    let nodes = node_names("n", 3);
    let mut ring = ring_with(32, Blake3Hasher, &nodes);
    let entries: Vec<(u64, NodeId)> = ring.entries().map(|(p, n)| (p, n.clone())).collect();

    ring.add_node("n-1");
    ring.add_node("n-1");

    let again: Vec<(u64, NodeId)> = ring.entries().map(|(p, n)| (p, n.clone())).collect();
    assert_eq!(entries, again);
    assert_eq!(ring.node_count(), 3);
}

/// Insertion order does not affect placement.
#[test]
fn test_placement_independent_of_insertion_order() {
    let nodes = node_names("n", 5);
    let mut reversed = nodes.clone();
    reversed.reverse();
    let keys = sample_keys(1_000);

    let forward = ring_with(STAT_REPLICAS, Blake3Hasher, &nodes);
    let backward = ring_with(STAT_REPLICAS, Blake3Hasher, &reversed);

    assert_eq!(owners(&forward, &keys), owners(&backward, &keys));
}

//! Integration test: concrete placement scenarios on hand-placed positions.

use conring_integration_tests::table_hasher;
use conring_ring::{Blake3Hasher, Position, Ring, RingHasher};

/// Node1 at 100/400/700, Node2 at 200/500/800, Node3 at 300/600/900.
fn three_node_table() -> Vec<(&'static str, Position)> {
    vec![
        ("Node1:0", 100),
        ("Node2:0", 200),
        ("Node3:0", 300),
        ("Node1:1", 400),
        ("Node2:1", 500),
        ("Node3:1", 600),
        ("Node1:2", 700),
        ("Node2:2", 800),
        ("Node3:2", 900),
    ]
}

#[test]
fn test_removing_node2_hands_its_arcs_clockwise() {
    let hasher = table_hasher(&three_node_table());
    let mut ring = Ring::with_nodes(3, hasher, ["Node1", "Node2", "Node3"]).unwrap();

    let node2_keys = ["101", "200", "450", "799"];
    for key in node2_keys {
        assert_eq!(ring.get_node(key).unwrap(), "Node2", "key {key}");
    }

    ring.remove_node("Node2");

    assert_eq!(ring.vnode_count(), 6);
    for position in [200, 500, 800] {
        assert!(ring.entries().all(|(p, _)| p != position));
    }
    assert_eq!(ring.get_node("101").unwrap(), "Node3");
    assert_eq!(ring.get_node("200").unwrap(), "Node3");
    assert_eq!(ring.get_node("450").unwrap(), "Node3");
    assert_eq!(ring.get_node("799").unwrap(), "Node3");
}

#[test]
fn test_removing_node2_with_real_hash_deletes_its_three_positions() {
    let mut ring = Ring::with_nodes(3, Blake3Hasher, ["Node1", "Node2", "Node3"]).unwrap();
    let node2_positions: Vec<Position> = (0..3)
        .map(|i| Blake3Hasher.hash(format!("Node2:{i}").as_bytes()))
        .collect();
    let before: Vec<Position> = ring.entries().map(|(p, _)| p).collect();

    ring.remove_node("Node2");

    let after: Vec<Position> = ring.entries().map(|(p, _)| p).collect();
    let expected: Vec<Position> = before
        .into_iter()
        .filter(|p| !node2_positions.contains(p))
        .collect();
    assert_eq!(after, expected);
    assert_eq!(after.len(), 6);
}

#[test]
fn test_keys_past_last_position_wrap_to_first() {
    let hasher = table_hasher(&three_node_table());
    let ring = Ring::with_nodes(3, hasher, ["Node1", "Node2", "Node3"]).unwrap();

    assert_eq!(ring.get_node("901").unwrap(), "Node1");
    assert_eq!(ring.get_node(u64::MAX.to_string()).unwrap(), "Node1");
}

#[test]
fn test_wraparound_follows_lowest_survivor() {
    let hasher = table_hasher(&three_node_table());
    let mut ring = Ring::with_nodes(3, hasher, ["Node1", "Node2", "Node3"]).unwrap();

    ring.remove_node("Node1");

    // 100 is gone; the lowest position is now Node2's 200.
    assert_eq!(ring.get_node("950").unwrap(), "Node2");
    assert_eq!(ring.get_node("50").unwrap(), "Node2");
}

#[test]
fn test_empty_ring_routes_nothing() {
    let ring = Ring::new(3).unwrap();
    assert_eq!(ring.get_node("anykey"), None);
    assert_eq!(ring.vnode_count(), 0);
}

#[test]
fn test_ring_empty_again_after_all_removed() {
    let mut ring = Ring::with_nodes(3, Blake3Hasher, ["Node1", "Node2", "Node3"]).unwrap();
    for node in ["Node3", "Node1", "Node2"] {
        ring.remove_node(node);
    }
    assert!(ring.is_empty());
    assert_eq!(ring.node_count(), 0);
    assert_eq!(ring.get_node("anykey"), None);
}

#[test]
fn test_collision_then_removal_keeps_survivor_routable() {
    // "A:0" and "B:0" share position 500.
    let hasher = table_hasher(&[("A:0", 500), ("A:1", 100), ("B:0", 500), ("B:1", 300)]);
    let mut ring = Ring::with_nodes(2, hasher, ["A", "B"]).unwrap();
    assert_eq!(ring.get_node("400").unwrap(), "B");

    ring.remove_node("A");

    // B still owns 300 and 500; nothing routes to A.
    assert_eq!(ring.vnode_count(), 2);
    assert_eq!(ring.get_node("50").unwrap(), "B");
    assert_eq!(ring.get_node("400").unwrap(), "B");
    assert_eq!(ring.get_node("600").unwrap(), "B");
}

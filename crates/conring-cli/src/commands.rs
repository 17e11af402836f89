//! Subcommand implementations.
//!
//! Each command writes its report to `out` so it can be exercised in tests
//! without capturing stdout.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{Context, Result};
use conring_ring::{HasherKind, NodeId, Ring, RingConfig};
use tracing::info;

/// Nodes placed by `demo` when none are given on the command line.
pub const DEMO_NODES: [&str; 3] = ["Node1", "Node2", "Node3"];

/// Keys resolved by `demo` when none are given on the command line.
pub const DEMO_KEYS: [&str; 5] = ["Key1", "Key2", "Key3", "Key4", "Key5"];

/// Build a ring from configuration and add `nodes` in order.
pub fn build_ring(config: &RingConfig, nodes: &[NodeId]) -> Result<Ring<HasherKind>> {
    let ring = Ring::with_nodes(config.replicas, config.hasher, nodes.iter().cloned())
        .context("invalid ring configuration")?;

    info!(
        nodes = ring.node_count(),
        vnodes = ring.vnode_count(),
        replicas = ring.replicas(),
        hasher = %config.hasher,
        "ring built"
    );
    Ok(ring)
}

/// Walk through adding nodes, resolving keys, removing one node and
/// resolving the same keys again.
pub fn demo(
    out: &mut dyn Write,
    config: &RingConfig,
    nodes: &[NodeId],
    keys: &[String],
    remove: &str,
) -> Result<()> {
    let mut ring = build_ring(config, nodes)?;

    writeln!(out, "Initial circle:")?;
    write!(out, "{ring}")?;

    writeln!(out, "\nKey distribution:")?;
    let before: BTreeMap<&str, Option<NodeId>> = keys
        .iter()
        .map(|key| (key.as_str(), ring.get_node(key).cloned()))
        .collect();
    for key in keys {
        let owner = owner_label(before[key.as_str()].as_ref());
        writeln!(out, "Key: {key} is mapped to Node: {owner}")?;
    }

    writeln!(out, "\nRemoving {remove} from the circle...")?;
    ring.remove_node(remove);
    info!(node = remove, vnodes = ring.vnode_count(), "node removed");
    write!(out, "{ring}")?;

    writeln!(out, "\nKey distribution after removing {remove}:")?;
    for key in keys {
        let owner = ring.get_node(key);
        let previous = before[key.as_str()].as_ref();
        write!(out, "Key: {key} is mapped to Node: {}", owner_label(owner))?;
        match previous {
            Some(prev) if Some(prev) != owner => writeln!(out, " (moved from {prev})")?,
            _ => writeln!(out)?,
        }
    }

    Ok(())
}

/// Resolve each key and print its position and owner.
pub fn lookup(out: &mut dyn Write, ring: &Ring<HasherKind>, keys: &[String]) -> Result<()> {
    for key in keys {
        writeln!(
            out,
            "Key: {key} (hash {}) is mapped to Node: {}",
            ring.position_of(key),
            owner_label(ring.get_node(key))
        )?;
    }
    Ok(())
}

/// Print every ring entry in position order.
pub fn entries(out: &mut dyn Write, ring: &Ring<HasherKind>) -> Result<()> {
    if ring.is_empty() {
        writeln!(out, "(empty ring)")?;
        return Ok(());
    }
    write!(out, "{ring}")?;
    Ok(())
}

/// Resolve `samples` synthetic keys and print each node's share.
pub fn distribution(out: &mut dyn Write, ring: &Ring<HasherKind>, samples: usize) -> Result<()> {
    let keys = (0..samples).map(|i| format!("sample-key-{i}"));
    let counts = ring.load_distribution(keys);

    if counts.is_empty() {
        writeln!(out, "(empty ring)")?;
        return Ok(());
    }

    for (node, count) in &counts {
        let share = if samples == 0 {
            0.0
        } else {
            *count as f64 * 100.0 / samples as f64
        };
        writeln!(out, "{node}: {count} keys ({share:.2}%)")?;
    }
    Ok(())
}

fn owner_label(owner: Option<&NodeId>) -> &str {
    owner.map_or("<none>", NodeId::as_str)
}

//! TOML configuration for the `conring` CLI.
//!
//! Every section is optional; a missing file or an empty one yields a ring of
//! [`DEFAULT_REPLICAS`](conring_types::DEFAULT_REPLICAS) BLAKE3 replicas with
//! no nodes. Command-line flags override file values.

use std::path::Path;

use anyhow::Context;
use conring_types::{HasherKind, NodeId, RingConfig};
use serde::Deserialize;

/// Top-level configuration, parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Ring construction parameters.
    pub ring: RingConfig,
    /// Nodes placed on the ring.
    pub cluster: ClusterSection,
    /// Logging configuration.
    pub log: LogSection,
}

/// `[cluster]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClusterSection {
    /// Node identifiers, added in order.
    pub nodes: Vec<String>,
}

/// `[log]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Log level filter (e.g. `"info"`, `"debug"`, `"warn"`).
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file, or use defaults if no path given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("failed to read config {}", p.display()))?;
                let config: CliConfig = toml::from_str(&content)
                    .with_context(|| format!("failed to parse config {}", p.display()))?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a TOML string (used in tests).
    #[cfg(test)]
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Effective ring parameters after command-line overrides.
    pub fn ring_config(&self, replicas: Option<u16>, hasher: Option<HasherKind>) -> RingConfig {
        RingConfig {
            replicas: replicas.unwrap_or(self.ring.replicas),
            hasher: hasher.unwrap_or(self.ring.hasher),
        }
    }

    /// Effective node list: command-line nodes replace the configured ones.
    pub fn nodes(&self, overrides: &[String]) -> Vec<NodeId> {
        let source = if overrides.is_empty() {
            self.cluster.nodes.as_slice()
        } else {
            overrides
        };
        source.iter().map(|n| NodeId::from(n.as_str())).collect()
    }
}

/// Parse a `--hasher` value.
pub fn parse_hasher(s: &str) -> Result<HasherKind, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "blake3" => Ok(HasherKind::Blake3),
        "xxh64" | "xxhash64" => Ok(HasherKind::Xxh64),
        other => Err(format!("unknown hasher `{other}` (expected blake3 or xxh64)")),
    }
}

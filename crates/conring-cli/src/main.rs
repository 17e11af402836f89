//! `conring`: explore a consistent hashing ring from the command line.
//!
//! # Usage
//!
//! ```text
//! conring demo                                  # add Node1..3, map Key1..5, remove Node2
//! conring -c conring.toml entries               # print configured ring entries
//! conring -n a -n b -n c lookup user:1 user:2   # resolve keys
//! conring -n a -n b distribution -s 100000      # sample load per node
//! ```

mod commands;
mod config;
mod telemetry;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use conring_ring::{HasherKind, NodeId};
use tracing::debug;

use config::CliConfig;

// -----------------------------------------------------------------------
// CLI definition
// -----------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "conring", version, about = "Consistent hashing ring explorer")]
struct Cli {
    /// Path to TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Virtual replicas per node (overrides `[ring] replicas`).
    #[arg(short, long, global = true)]
    replicas: Option<u16>,

    /// Hash function: `blake3` or `xxh64` (overrides `[ring] hasher`).
    #[arg(long, global = true, value_parser = config::parse_hasher)]
    hasher: Option<HasherKind>,

    /// Node to place on the ring. Repeat for several nodes; replaces
    /// `[cluster] nodes` when given.
    #[arg(short = 'n', long = "node", global = true)]
    nodes: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add nodes, map keys, remove one node and map the keys again.
    ///
    /// Uses 3 replicas and Node1..Node3 unless overridden.
    Demo {
        /// Node to remove halfway through.
        #[arg(long, default_value = "Node2")]
        remove: String,

        /// Keys to resolve before and after the removal.
        #[arg(short, long = "key")]
        keys: Vec<String>,
    },

    /// Resolve keys to their owning node.
    Lookup {
        /// Keys to resolve.
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Print every ring entry in position order.
    Entries,

    /// Resolve synthetic keys and print each node's share.
    Distribution {
        /// Number of sample keys.
        #[arg(short, long, default_value = "10000")]
        samples: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;
    telemetry::init(&config.log.level);
    debug!(?config, "loaded configuration");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Demo { remove, keys } => {
            let ring_config = config.ring_config(cli.replicas.or(Some(3)), cli.hasher);
            let nodes = if cli.nodes.is_empty() {
                commands::DEMO_NODES.iter().map(|&n| NodeId::from(n)).collect()
            } else {
                config.nodes(&cli.nodes)
            };
            let keys = if keys.is_empty() {
                commands::DEMO_KEYS.iter().map(|k| k.to_string()).collect()
            } else {
                keys
            };
            commands::demo(&mut out, &ring_config, &nodes, &keys, &remove)
        }
        Commands::Lookup { keys } => {
            let ring_config = config.ring_config(cli.replicas, cli.hasher);
            let ring = commands::build_ring(&ring_config, &config.nodes(&cli.nodes))?;
            commands::lookup(&mut out, &ring, &keys)
        }
        Commands::Entries => {
            let ring_config = config.ring_config(cli.replicas, cli.hasher);
            let ring = commands::build_ring(&ring_config, &config.nodes(&cli.nodes))?;
            commands::entries(&mut out, &ring)
        }
        Commands::Distribution { samples } => {
            let ring_config = config.ring_config(cli.replicas, cli.hasher);
            let ring = commands::build_ring(&ring_config, &config.nodes(&cli.nodes))?;
            commands::distribution(&mut out, &ring, samples)
        }
    }
}

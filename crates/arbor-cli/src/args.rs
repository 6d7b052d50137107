//! Command-line argument definitions for the Arbor CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input geometry, the request to run,
//! where the JSON result goes, the configuration file and logging verbosity.

use clap::Parser;

use arbor::descriptor::NodeId;

/// Command-line arguments for the Arbor hierarchy extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input geometry file (JSON)
    #[arg(help = "Path to the input geometry file")]
    pub input: String,

    /// Path to the output JSON file, standard output if omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Request to run (detect, debug, extract-with-root)
    #[arg(short, long, default_value = "detect")]
    pub action: String,

    /// Root node id for extract-with-root, as `node_<n>` or `<n>`
    #[arg(short, long)]
    pub root: Option<NodeId>,
}

use std::path::PathBuf;

use clap::Parser;

/// Drive a Jacobi co-simulation across one or more `fmitcp-server` instances.
#[derive(Debug, Parser)]
#[command(name = "fmi-master")]
pub struct MasterOptions {
    /// TOML file naming the component server addresses, connections, and timing.
    #[arg(long)]
    pub config: PathBuf,

    /// Write a CSV row per communication point to this path (output columns from the config).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

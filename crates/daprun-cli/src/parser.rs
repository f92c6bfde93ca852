//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Run applications next to a Dapr sidecar on this machine.
#[derive(Debug, Parser)]
#[command(name = "daprun")]
#[command(about = "Run an application with a Dapr sidecar in self-hosted mode")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

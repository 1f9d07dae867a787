//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Computer club day simulator.
///
/// Replays one operating day from an input log and prints the full event
/// log followed by per-table revenue and occupied time.
#[derive(Debug, Parser)]
#[command(name = "club", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// The day's input file.
    pub input: PathBuf,
}

use clap::Parser;
use std::path::PathBuf;

/// Installs Node.js (if needed) and the dev-setup CLI on macOS.
///
/// Run without arguments for the interactive installer.
#[derive(Parser)]
#[command(name = "muggleout-install")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

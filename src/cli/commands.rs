//! CLI arguments

use clap::Parser;
use std::path::PathBuf;

/// Total up your Steam Community Market history
#[derive(Parser, Debug)]
#[command(name = "market-history")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of top transactions to list
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub top: u32,

    /// Write the full history as JSON to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Settings file (YAML)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Credentials file (defaults to the user config directory)
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Delete stored credentials and exit
    #[arg(long)]
    pub logout: bool,
}

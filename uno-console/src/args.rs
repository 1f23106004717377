//! Command line arguments

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Play UNO against the computer", long_about = None)]
pub struct Args {
    /// Seed for the shuffle. A random one is picked when absent.
    #[arg(short, long, env = "UNO_SEED")]
    pub seed: Option<u64>,

    /// Most verbose log level written to stderr.
    #[arg(long, env = "UNO_LOG", default_value = "warn")]
    pub log_level: Level,

    /// Print cards without ANSI colors.
    #[arg(long)]
    pub no_color: bool,

    /// Show the computer's hand face up.
    #[arg(long)]
    pub reveal: bool,

    /// Continue a match saved with the `save` command.
    #[arg(short, long, value_name = "PATH")]
    pub resume: Option<PathBuf>,
}

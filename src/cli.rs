use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Local to-do list manager with a terminal dashboard.
/// Storage defaults to ~/.taskboard or a directory passed via --dir.
#[derive(Parser)]
#[command(name = "tb", version, about = "To-do list manager with categories, priorities and charts")]
pub struct Cli {
    /// Directory holding tasks.json and config.toml.
    #[arg(long, global = true, env = "TASKBOARD_DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

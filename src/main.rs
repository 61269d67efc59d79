//! # tb - Taskboard CLI
//!
//! Manage a to-do list from the command line or through an interactive
//! terminal dashboard with live counters and charts.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the dashboard
//! tb ui
//!
//! # Add a task via CLI
//! tb add "Buy milk" --category shopping --priority low --due tomorrow
//!
//! # List pending work, highest priority first
//! tb list --status pending --sort priority
//!
//! # Write a standalone HTML report
//! tb export -o tasks.html
//! ```
//!
//! Data is stored locally in `~/.taskboard/tasks.json`. Set `--dir` or
//! `TASKBOARD_DIR` to use another directory.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use taskboard::cli::Cli;
use taskboard::cmd::{run_command, Context};
use taskboard::config::resolve;

fn main() {
    // Tracing is opt-in via RUST_LOG.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    let result = resolve(cli.dir.as_deref()).and_then(|(data_dir, config)| {
        let ctx = Context { data_dir, config };
        run_command(&ctx, cli.command)
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

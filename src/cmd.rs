//! Command implementations for the CLI interface.
//!
//! Each subcommand maps onto one task store operation or one view of the
//! collection. Confirmations are asked on the terminal unless `--yes` is
//! given.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Args, Subcommand};
use clap_complete::{generate, Shell};
use tracing::debug;

use crate::config::Config;
use crate::db::FileStore;
use crate::error::{Error, Result};
use crate::fields::*;
use crate::render::{counters, export_page, print_table};
use crate::store::{Prompt, TaskStore};
use crate::task::NewTask;
use crate::tui::run::run_tui;
use crate::view::{category_tally, priority_tally, project, Stats, ViewState};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive dashboard.
    Ui,

    /// Add a new task.
    Add {
        /// Task text.
        text: String,
        /// Category: work | personal | shopping | health | other.
        #[arg(long, value_enum)]
        category: Option<Category>,
        /// Priority: high | medium | low.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "friday", or "in Nd".
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks with optional filters.
    List {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Toggle a task between pending and completed.
    Toggle {
        /// Task ID.
        id: u64,
    },

    /// Delete a task by ID.
    Delete {
        /// Task ID.
        id: u64,
        /// Do not ask for confirmation.
        #[arg(long, short)]
        yes: bool,
    },

    /// Delete every task.
    Clear {
        /// Do not ask for confirmation.
        #[arg(long, short)]
        yes: bool,
    },

    /// Show counters and per-priority / per-category tallies.
    Stats {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Write a standalone HTML page with the list and charts.
    Export {
        /// Output file path.
        #[arg(long, short, default_value = "tasks.html")]
        output: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Filters, sort and search shared by `list` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Status filter.
    #[arg(long, value_enum, default_value_t = StatusFilter::All)]
    pub status: StatusFilter,
    /// Only this priority.
    #[arg(long, value_enum)]
    pub priority: Option<Priority>,
    /// Only this category.
    #[arg(long, value_enum)]
    pub category: Option<Category>,
    /// Sort order (defaults to the configured sort).
    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,
    /// Case-insensitive text search.
    #[arg(long)]
    pub search: Option<String>,
}

impl ViewArgs {
    pub fn to_view(&self, config: &Config) -> ViewState {
        ViewState {
            status: self.status,
            priority: self.priority,
            category: self.category,
            sort: self.sort.unwrap_or(config.defaults.sort),
            search: self.search.clone().unwrap_or_default(),
        }
    }
}

/// Resolved data directory and configuration for a command run.
pub struct Context {
    pub data_dir: PathBuf,
    pub config: Config,
}

impl Context {
    pub fn open_store(&self) -> Result<TaskStore<FileStore>> {
        TaskStore::open(FileStore::open(&self.data_dir)?)
    }
}

/// Confirmation and notices on the controlling terminal.
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Dispatch a parsed command.
pub fn run_command(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Ui => cmd_ui(ctx),
        Commands::Add { text, category, priority, due } => cmd_add(ctx, text, category, priority, due),
        Commands::List { view } => cmd_list(ctx, &view),
        Commands::Toggle { id } => cmd_toggle(ctx, id),
        Commands::Delete { id, yes } => cmd_delete(ctx, id, yes),
        Commands::Clear { yes } => cmd_clear(ctx, yes),
        Commands::Stats { json } => cmd_stats(ctx, json),
        Commands::Export { output, view } => cmd_export(ctx, &output, &view),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

/// Launch the terminal dashboard.
pub fn cmd_ui(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    run_tui(store, ctx.config.clone())?;
    Ok(())
}

/// Add a new task to the store.
pub fn cmd_add(
    ctx: &Context,
    text: String,
    category: Option<Category>,
    priority: Option<Priority>,
    due: Option<String>,
) -> Result<()> {
    let today = Local::now().date_naive();
    let due_date = match due.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => Some(
            crate::dates::parse_due_input(raw, today).ok_or_else(|| Error::InvalidDate(raw.to_string()))?,
        ),
        None => None,
    };
    let input = NewTask::new(text)
        .category(category.unwrap_or(ctx.config.defaults.category))
        .priority(priority.unwrap_or(ctx.config.defaults.priority))
        .due(due_date);

    let mut store = ctx.open_store()?;
    let mut prompt = TerminalPrompt::new(false);
    if let Some(id) = store.add(input, &mut prompt)? {
        println!("Added task {id}");
    }
    Ok(())
}

/// List tasks with filtering, search and sorting.
pub fn cmd_list(ctx: &Context, args: &ViewArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let view = args.to_view(&ctx.config);
    debug!(view = %view.describe(), "listing tasks");
    let shown = project(store.tasks(), &view);
    let today = Local::now().date_naive();
    print_table(&shown, today, &ctx.config.display.date_format);

    let stats = Stats::compute(store.tasks());
    println!(
        "\n{} shown of {} | {} completed, {} pending | {}% done",
        shown.len(),
        stats.total,
        stats.completed,
        stats.pending,
        stats.percent
    );
    Ok(())
}

/// Flip a task's completion state.
pub fn cmd_toggle(ctx: &Context, id: u64) -> Result<()> {
    let mut store = ctx.open_store()?;
    match store.toggle(id)? {
        Some(true) => println!("Completed task {id}"),
        Some(false) => println!("Reopened task {id}"),
        None => return Err(Error::TaskNotFound(id)),
    }
    Ok(())
}

/// Delete a task after confirmation.
pub fn cmd_delete(ctx: &Context, id: u64, yes: bool) -> Result<()> {
    let mut store = ctx.open_store()?;
    if store.get(id).is_none() {
        return Err(Error::TaskNotFound(id));
    }
    let mut prompt = TerminalPrompt::new(yes);
    if store.delete(id, &mut prompt)? {
        println!("Deleted task {id}");
    } else {
        println!("Cancelled.");
    }
    Ok(())
}

/// Delete every task after confirmation.
pub fn cmd_clear(ctx: &Context, yes: bool) -> Result<()> {
    let mut store = ctx.open_store()?;
    let was_empty = store.is_empty();
    let mut prompt = TerminalPrompt::new(yes);
    let removed = store.clear_all(&mut prompt)?;
    if removed > 0 {
        println!("Deleted {removed} task(s)");
    } else if !was_empty {
        println!("Cancelled.");
    }
    Ok(())
}

/// Print counters and tallies for the whole collection.
pub fn cmd_stats(ctx: &Context, json: bool) -> Result<()> {
    let store = ctx.open_store()?;
    let tasks = store.tasks();
    let stats = Stats::compute(tasks);
    let by_priority = priority_tally(tasks);
    let by_category = category_tally(tasks);

    if json {
        let priority: serde_json::Map<String, serde_json::Value> = Priority::ALL
            .iter()
            .map(|p| (p.as_str().to_string(), by_priority[p.index()].into()))
            .collect();
        let category: serde_json::Map<String, serde_json::Value> = Category::ALL
            .iter()
            .map(|c| (c.as_str().to_string(), by_category[c.index()].into()))
            .collect();
        let out = serde_json::json!({
            "total": stats.total,
            "completed": stats.completed,
            "pending": stats.pending,
            "percent": stats.percent,
            "priority": priority,
            "category": category,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for (label, value) in counters(&stats) {
        println!("{:<12} {}", format!("{label}:"), value);
    }
    println!();
    println!("{:<12} {}", "Priority", "Count");
    for p in Priority::ALL {
        println!("{:<12} {}", format!("{} {}", p.emoji(), p.label()), by_priority[p.index()]);
    }
    println!();
    println!("{:<12} {}", "Category", "Count");
    for c in Category::ALL {
        println!("{:<12} {}", format!("{} {}", c.emoji(), c.label()), by_category[c.index()]);
    }
    Ok(())
}

/// Write the HTML page for the current view.
pub fn cmd_export(ctx: &Context, output: &Path, args: &ViewArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let view = args.to_view(&ctx.config);
    let shown = project(store.tasks(), &view);
    let today = Local::now().date_naive();
    let page = export_page(store.tasks(), &shown, today, &ctx.config.display.date_format);
    fs::write(output, page)?;
    println!("Exported {} task(s) to {}", shown.len(), output.display());
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}

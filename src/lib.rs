//! # Taskboard
//!
//! A local to-do list manager: tasks carry a category, a priority and an
//! optional due date, and are kept in a single JSON document under the data
//! directory (`~/.taskboard` by default).
//!
//! ## Module Organization
//!
//! - `store`: the task store, sole owner and mutator of the collection
//! - `db`: key-value persistence (`tasks.json`) and malformed-data recovery
//! - `view`: filtering, sorting and aggregate tallies
//! - `render`: list markup, chart datasets, HTML export and plain tables
//! - `tui`: the interactive dashboard
//! - `cli` / `cmd`: command-line parsing and subcommand handlers
//! - `config`: optional `config.toml` defaults

pub mod cli;
pub mod cmd;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod fields;
pub mod render;
pub mod store;
pub mod task;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

pub use error::{Error, Result};

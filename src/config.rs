//! Configuration loading.
//!
//! Handles the optional `config.toml` in the data directory. Every field has
//! a default, so a missing file or a partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::fields::{Category, Priority, SortKey};

pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable that overrides the data directory.
pub const DIR_ENV: &str = "TASKBOARD_DIR";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where tasks are stored, when not given on the command line.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Values the add form starts with
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub display: Display,
}

/// Form and view defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub sort: SortKey,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            category: Category::Work,
            priority: Priority::Medium,
            sort: SortKey::DateDesc,
        }
    }
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Display {
    /// strftime pattern for due dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    "%-m/%-d/%Y".to_string()
}

impl Default for Display {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

impl Config {
    /// Load `config.toml` from `dir`, falling back to defaults when absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(&path)?;
        let config = Self::parse(&raw).map_err(|source| Error::ConfigParse {
            path: path.clone(),
            source,
        })?;
        if !is_valid_date_format(&config.display.date_format) {
            return Err(Error::InvalidDateFormat {
                path,
                format: config.display.date_format,
            });
        }
        Ok(config)
    }

    pub fn parse(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

/// Directory named by the `--dir` flag or `TASKBOARD_DIR`, if any.
pub fn explicit_data_dir(flag: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = flag {
        return Some(dir.to_path_buf());
    }
    std::env::var_os(DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// `$HOME/.taskboard`, or `./.taskboard` when `HOME` is unset.
pub fn default_data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".taskboard")
}

/// Load the config at `dir` and follow its `data_dir` redirect, if any.
pub fn load_with_redirect(dir: PathBuf) -> Result<(PathBuf, Config)> {
    let config = Config::load(&dir)?;
    match config.data_dir.clone() {
        Some(target) if target != dir => {
            debug!(from = %dir.display(), to = %target.display(), "config redirects data directory");
            Ok((target, config))
        }
        _ => Ok((dir, config)),
    }
}

/// Whether `fmt` is a strftime pattern chrono can render.
pub fn is_valid_date_format(fmt: &str) -> bool {
    !StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error))
}

/// Resolve the data directory and load its configuration.
///
/// Order: explicit flag, `TASKBOARD_DIR`, the `data_dir` set in the default
/// directory's config file, then `$HOME/.taskboard`. An explicit directory
/// is never redirected.
pub fn resolve(flag: Option<&Path>) -> Result<(PathBuf, Config)> {
    match explicit_data_dir(flag) {
        Some(dir) => {
            let config = Config::load(&dir)?;
            Ok((dir, config))
        }
        None => load_with_redirect(default_data_dir()),
    }
}

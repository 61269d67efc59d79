//! Enumerations and field types for tasks and views.
//!
//! This module defines the fixed sets a task is classified by (category and
//! priority) and the selectable view options (status filter and sort key),
//! along with their display labels, emojis and parsers.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What area of life a task belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Work,
    Personal,
    Shopping,
    Health,
    Other,
}

impl Category {
    /// Every category, in chart and selector order.
    pub const ALL: [Category; 5] = [
        Category::Work,
        Category::Personal,
        Category::Shopping,
        Category::Health,
        Category::Other,
    ];

    /// Lowercase name as stored in JSON and shown on badges.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Shopping => "shopping",
            Category::Health => "health",
            Category::Other => "other",
        }
    }

    /// Capitalised name used as a chart label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Category::Work => "💼",
            Category::Personal => "👤",
            Category::Shopping => "🛒",
            Category::Health => "❤️",
            Category::Other => "📌",
        }
    }

    /// Position within [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// How important a task is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Every priority, highest first.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Priority::High => "🔴",
            Priority::Medium => "🟡",
            Priority::Low => "🟢",
        }
    }

    /// Sort rank: high sorts before medium before low.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn index(self) -> usize {
        self.rank() as usize
    }
}

/// Completion filter applied to the task list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Completed, StatusFilter::Pending];

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Completed => "Completed",
            StatusFilter::Pending => "Pending",
        }
    }

    /// Whether a task with the given completion state passes this filter.
    pub fn matches(self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => completed,
            StatusFilter::Pending => !completed,
        }
    }
}

/// Available orderings for the displayed task list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Newest first.
    #[default]
    DateDesc,
    /// Oldest first.
    DateAsc,
    /// High, then medium, then low.
    Priority,
    /// By task text.
    Alphabetical,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::Priority,
        SortKey::Alphabetical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::DateDesc => "Newest First",
            SortKey::DateAsc => "Oldest First",
            SortKey::Priority => "By Priority",
            SortKey::Alphabetical => "Alphabetical",
        }
    }
}

/// Step to the next element of a fixed cycle, wrapping at the end.
pub fn cycle_next<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + 1) % all.len()]
}

/// Step through `None` (meaning "all") followed by every value in `all`.
pub fn cycle_optional<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(v) => {
            let idx = all.iter().position(|x| *x == v).unwrap_or(all.len());
            all.get(idx + 1).copied()
        }
    }
}

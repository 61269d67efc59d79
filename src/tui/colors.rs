//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{Category, Priority};

/// Pending slice of the status chart
pub const AMBER: Color = Color::Rgb(255, 193, 7);
/// Completed slice of the status chart
pub const GREEN: Color = Color::Rgb(76, 175, 80);
/// Confirmation dialogs
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Header and status bar
pub const DARK_PURPLE: Color = Color::Rgb(86, 60, 92);

pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::High => Color::Rgb(255, 107, 107),
        Priority::Medium => Color::Rgb(255, 165, 0),
        Priority::Low => GREEN,
    }
}

pub fn category_color(c: Category) -> Color {
    match c {
        Category::Work => Color::Rgb(52, 168, 224),
        Category::Personal => Color::Rgb(156, 39, 176),
        Category::Shopping => Color::Rgb(244, 67, 54),
        Category::Health => GREEN,
        Category::Other => Color::Rgb(158, 158, 158),
    }
}

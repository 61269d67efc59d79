//! Add-task form for the terminal user interface.
//!
//! Four fields in tab order: text, category selector, priority selector and
//! due date. Selectors cycle with the left/right keys.

use chrono::NaiveDate;

use crate::config::Defaults;
use crate::dates::parse_due_input;
use crate::error::{Error, Result};
use crate::fields::{Category, Priority};
use crate::task::NewTask;
use crate::tui::input::InputField;

pub const TEXT_FIELD: usize = 0;
pub const CATEGORY_FIELD: usize = 1;
pub const PRIORITY_FIELD: usize = 2;
pub const DUE_FIELD: usize = 3;
const FIELD_COUNT: usize = 4;

/// Task form state
pub struct TaskForm {
    pub text: InputField,
    pub due: InputField,
    pub category: usize,
    pub priority: usize,
    pub current_field: usize,
    defaults: Defaults,
}

impl TaskForm {
    /// Create an empty form with the configured selector defaults.
    pub fn new(defaults: &Defaults) -> Self {
        Self {
            text: InputField::new(),
            due: InputField::new(),
            category: defaults.category.index(),
            priority: defaults.priority.index(),
            current_field: TEXT_FIELD,
            defaults: defaults.clone(),
        }
    }

    /// Clear inputs and restore the default selections.
    pub fn reset(&mut self) {
        *self = Self::new(&self.defaults);
    }

    pub fn selected_category(&self) -> Category {
        Category::ALL[self.category]
    }

    pub fn selected_priority(&self) -> Priority {
        Priority::ALL[self.priority]
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    /// The text input that currently has focus, if any.
    pub fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TEXT_FIELD => Some(&mut self.text),
            DUE_FIELD => Some(&mut self.due),
            _ => None,
        }
    }

    /// Move the cursor in text inputs, cycle the value in selectors.
    pub fn handle_left_right(&mut self, forward: bool) {
        match self.current_field {
            CATEGORY_FIELD => self.category = step(self.category, Category::ALL.len(), forward),
            PRIORITY_FIELD => self.priority = step(self.priority, Priority::ALL.len(), forward),
            _ => {
                if let Some(input) = self.active_input() {
                    if forward {
                        input.move_cursor_right();
                    } else {
                        input.move_cursor_left();
                    }
                }
            }
        }
    }

    pub fn handle_char(&mut self, c: char) {
        if let Some(input) = self.active_input() {
            input.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(input) = self.active_input() {
            input.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(input) = self.active_input() {
            input.handle_delete();
        }
    }

    /// Build the store input. The text is passed through untrimmed; the
    /// store decides whether it is acceptable.
    pub fn to_new_task(&self, today: NaiveDate) -> Result<NewTask> {
        let raw_due = self.due.value.trim();
        let due_date = if raw_due.is_empty() {
            None
        } else {
            Some(parse_due_input(raw_due, today).ok_or_else(|| Error::InvalidDate(raw_due.to_string()))?)
        };
        Ok(NewTask::new(self.text.value.clone())
            .category(self.selected_category())
            .priority(self.selected_priority())
            .due(due_date))
    }
}

fn step(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

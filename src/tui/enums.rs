//! Enumerations for TUI state management.

/// Which screen the dashboard is showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    AddTask,
    Help,
    Confirm,
    Notice,
}

/// A destructive action waiting on the confirmation dialog.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PendingAction {
    Delete(u64),
    ClearAll,
}

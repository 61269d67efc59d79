//! The task store: sole owner and mutator of the task collection.
//!
//! Every mutation writes the whole collection back through the persistence
//! adapter before returning. Destructive operations ask a [`Prompt`] for
//! confirmation first, and validation problems are reported through the same
//! prompt rather than as errors.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::db::{load_tasks, save_tasks, KvStore};
use crate::error::Result;
use crate::task::{NewTask, Task};

pub const EMPTY_TEXT_NOTICE: &str = "Please enter a task!";
pub const NOTHING_TO_CLEAR_NOTICE: &str = "No tasks to clear!";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this task?";
pub const CLEAR_ALL_CONFIRM: &str = "Are you sure you want to delete ALL tasks? This cannot be undone.";

/// Blocking confirmation and notice services supplied by the front end.
pub trait Prompt {
    /// Ask the user to accept or decline a destructive action.
    fn confirm(&mut self, message: &str) -> bool;

    /// Show an informational message the user must acknowledge.
    fn notify(&mut self, message: &str);
}

/// A prompt with a predetermined answer that records every notice.
///
/// The dashboard uses it once its own confirmation dialog has been answered.
#[derive(Debug, Default, Clone)]
pub struct Answer {
    accept: bool,
    pub notices: Vec<String>,
    pub asked: Vec<String>,
}

impl Answer {
    pub fn yes() -> Self {
        Answer {
            accept: true,
            ..Default::default()
        }
    }

    pub fn no() -> Self {
        Answer::default()
    }
}

impl Prompt for Answer {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.accept
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

/// In-memory task collection mirrored to a key-value backend.
pub struct TaskStore<S: KvStore> {
    tasks: Vec<Task>,
    backend: S,
}

impl<S: KvStore> TaskStore<S> {
    /// Load the saved collection from `backend`.
    pub fn open(mut backend: S) -> Result<Self> {
        let tasks = load_tasks(&mut backend)?;
        Ok(TaskStore { tasks, backend })
    }

    /// Replace the in-memory collection with what is currently saved.
    pub fn reload(&mut self) -> Result<()> {
        self.tasks = load_tasks(&mut self.backend)?;
        Ok(())
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Add a task created now. See [`TaskStore::add_at`].
    pub fn add(&mut self, input: NewTask, prompt: &mut dyn Prompt) -> Result<Option<u64>> {
        self.add_at(input, Utc::now(), prompt)
    }

    /// Add a task with the given creation time.
    ///
    /// Returns `Ok(None)` after notifying the user when the trimmed text is
    /// empty; nothing is changed in that case.
    pub fn add_at(
        &mut self,
        input: NewTask,
        now: DateTime<Utc>,
        prompt: &mut dyn Prompt,
    ) -> Result<Option<u64>> {
        let text = input.text.trim();
        if text.is_empty() {
            prompt.notify(EMPTY_TEXT_NOTICE);
            return Ok(None);
        }
        let id = self.next_id(now);
        let task = Task::from_new(id, text.to_string(), &input, now);
        info!(id, category = task.category.as_str(), priority = task.priority.as_str(), "adding task");
        self.tasks.push(task);
        self.persist()?;
        Ok(Some(id))
    }

    /// Delete one task after confirmation.
    ///
    /// Returns whether a task was removed. Declining, or an id that is not
    /// present, leaves the collection untouched.
    pub fn delete(&mut self, id: u64, prompt: &mut dyn Prompt) -> Result<bool> {
        if !prompt.confirm(DELETE_CONFIRM) {
            debug!(id, "delete declined");
            return Ok(false);
        }
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        self.persist()?;
        if removed {
            info!(id, "deleted task");
        }
        Ok(removed)
    }

    /// Flip the completed flag of a task, returning its new value.
    pub fn toggle(&mut self, id: u64) -> Result<Option<bool>> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.completed = !task.completed;
        let completed = task.completed;
        self.persist()?;
        info!(id, completed, "toggled task");
        Ok(Some(completed))
    }

    /// Remove every task after confirmation, returning how many were removed.
    pub fn clear_all(&mut self, prompt: &mut dyn Prompt) -> Result<usize> {
        if self.tasks.is_empty() {
            prompt.notify(NOTHING_TO_CLEAR_NOTICE);
            return Ok(0);
        }
        if !prompt.confirm(CLEAR_ALL_CONFIRM) {
            debug!("clear all declined");
            return Ok(0);
        }
        let removed = self.tasks.len();
        self.tasks.clear();
        self.persist()?;
        info!(removed, "cleared all tasks");
        Ok(removed)
    }

    /// Time-derived id that is always greater than every existing id.
    fn next_id(&self, now: DateTime<Utc>) -> u64 {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let last = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        millis.max(last + 1)
    }

    fn persist(&mut self) -> Result<()> {
        save_tasks(&mut self.backend, &self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, TASKS_KEY};
    use crate::fields::{Category, Priority, SortKey};
    use crate::view::{project, ViewState};
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn empty_store() -> TaskStore<MemoryStore> {
        TaskStore::open(MemoryStore::new()).unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_blank_text_is_rejected_with_notice() {
        let mut store = empty_store();
        let mut prompt = Answer::yes();
        let id = store.add(NewTask::new("   \t "), &mut prompt).unwrap();
        assert_eq!(id, None);
        assert!(store.is_empty());
        assert_eq!(prompt.notices, vec![EMPTY_TEXT_NOTICE.to_string()]);
        assert_eq!(store.backend().item(TASKS_KEY), None);
    }

    #[test]
    fn test_add_trims_and_persists() {
        let mut store = empty_store();
        let input = NewTask::new("  Buy milk  ")
            .category(Category::Shopping)
            .priority(Priority::Low);
        let id = store.add_at(input, t0(), &mut Answer::no()).unwrap().unwrap();

        let task = store.get(id).unwrap();
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.category, Category::Shopping);
        assert_eq!(task.priority, Priority::Low);
        assert!(!task.completed);
        assert_eq!(task.created_at, t0());
        assert_eq!(id, t0().timestamp_millis() as u64);

        let saved = store.backend().item(TASKS_KEY).unwrap();
        assert!(saved.contains("\"Buy milk\""));
    }

    #[test]
    fn test_ids_stay_unique_within_same_millisecond() {
        let mut store = empty_store();
        let a = store.add_at(NewTask::new("a"), t0(), &mut Answer::no()).unwrap().unwrap();
        let b = store.add_at(NewTask::new("b"), t0(), &mut Answer::no()).unwrap().unwrap();
        let c = store
            .add_at(NewTask::new("c"), t0() - Duration::seconds(5), &mut Answer::no())
            .unwrap()
            .unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_toggle_twice_restores_task() {
        let mut store = empty_store();
        let id = store.add_at(NewTask::new("Read"), t0(), &mut Answer::no()).unwrap().unwrap();
        let original = store.get(id).unwrap().clone();

        assert_eq!(store.toggle(id).unwrap(), Some(true));
        assert_eq!(store.toggle(id).unwrap(), Some(false));
        assert_eq!(store.get(id).unwrap(), &original);
    }

    #[test]
    fn test_toggle_missing_is_noop() {
        let mut store = empty_store();
        assert_eq!(store.toggle(42).unwrap(), None);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut store = empty_store();
        let a = store.add_at(NewTask::new("a"), t0(), &mut Answer::no()).unwrap().unwrap();
        let b = store.add_at(NewTask::new("b"), t0(), &mut Answer::no()).unwrap().unwrap();

        let mut declined = Answer::no();
        assert!(!store.delete(a, &mut declined).unwrap());
        assert_eq!(declined.asked, vec![DELETE_CONFIRM.to_string()]);
        assert_eq!(store.len(), 2);

        assert!(store.delete(a, &mut Answer::yes()).unwrap());
        assert_eq!(store.tasks().iter().map(|t| t.id).collect::<Vec<_>>(), vec![b]);

        // Already gone.
        assert!(!store.delete(a, &mut Answer::yes()).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_all_on_empty_notifies() {
        let mut store = empty_store();
        let mut prompt = Answer::yes();
        assert_eq!(store.clear_all(&mut prompt).unwrap(), 0);
        assert_eq!(prompt.notices, vec![NOTHING_TO_CLEAR_NOTICE.to_string()]);
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn test_clear_all_declined_and_accepted() {
        let mut store = empty_store();
        for text in ["a", "b", "c"] {
            store.add_at(NewTask::new(text), t0(), &mut Answer::no()).unwrap();
        }
        assert_eq!(store.clear_all(&mut Answer::no()).unwrap(), 0);
        assert_eq!(store.len(), 3);
        assert_eq!(store.clear_all(&mut Answer::yes()).unwrap(), 3);
        assert!(store.is_empty());
        assert_eq!(store.backend().item(TASKS_KEY), Some("[]"));
    }

    #[test]
    fn test_reopen_yields_identical_collection() {
        let mut store = empty_store();
        store
            .add(NewTask::new("Dentist").category(Category::Health).priority(Priority::High), &mut Answer::no())
            .unwrap();
        let id = store.add(NewTask::new("Gym"), &mut Answer::no()).unwrap().unwrap();
        store.toggle(id).unwrap();

        let reopened = TaskStore::open(store.backend().clone()).unwrap();
        assert_eq!(reopened.tasks(), store.tasks());
    }

    #[test]
    fn test_storage_order_survives_projection_and_mutation() {
        let mut store = empty_store();
        let mut ids = Vec::new();
        for (i, text) in ["cherry", "apple", "banana", "date"].iter().enumerate() {
            let at = t0() + Duration::minutes(i as i64);
            ids.push(store.add_at(NewTask::new(*text), at, &mut Answer::no()).unwrap().unwrap());
        }

        let view = ViewState::with_sort(SortKey::Alphabetical);
        let shown: Vec<u64> = project(store.tasks(), &view).iter().map(|t| t.id).collect();
        assert_eq!(shown, vec![ids[1], ids[2], ids[0], ids[3]]);

        store.toggle(ids[2]).unwrap();
        let newest_first = ViewState::with_sort(SortKey::DateDesc);
        let _ = project(store.tasks(), &newest_first);
        assert!(store.delete(ids[1], &mut Answer::yes()).unwrap());

        let stored: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(stored, vec![ids[0], ids[2], ids[3]]);
        let reopened = TaskStore::open(store.backend().clone()).unwrap();
        let saved: Vec<u64> = reopened.tasks().iter().map(|t| t.id).collect();
        assert_eq!(saved, stored);
    }
}

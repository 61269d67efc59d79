//! View projection: the filtered, sorted list and the aggregate tallies.
//!
//! Everything here is a pure function of the task collection and the
//! current [`ViewState`]; nothing is stored or mutated.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::fields::{cycle_next, cycle_optional, Category, Priority, SortKey, StatusFilter};
use crate::task::Task;

/// Active filters, sort order and search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub status: StatusFilter,
    /// `None` shows every priority.
    pub priority: Option<Priority>,
    /// `None` shows every category.
    pub category: Option<Category>,
    pub sort: SortKey,
    pub search: String,
}

impl ViewState {
    pub fn with_sort(sort: SortKey) -> Self {
        ViewState {
            sort,
            ..Default::default()
        }
    }

    pub fn cycle_status(&mut self) {
        self.status = cycle_next(&StatusFilter::ALL, self.status);
    }

    pub fn cycle_priority(&mut self) {
        self.priority = cycle_optional(&Priority::ALL, self.priority);
    }

    pub fn cycle_category(&mut self) {
        self.category = cycle_optional(&Category::ALL, self.category);
    }

    pub fn cycle_sort(&mut self) {
        self.sort = cycle_next(&SortKey::ALL, self.sort);
    }

    /// Whether a task passes every active filter.
    pub fn matches(&self, task: &Task) -> bool {
        if !self.status.matches(task.completed) {
            return false;
        }
        if self.priority.is_some_and(|p| p != task.priority) {
            return false;
        }
        if self.category.is_some_and(|c| c != task.category) {
            return false;
        }
        let query = &self.search;
        if !query.is_empty() && !task.text.to_lowercase().contains(&query.to_lowercase()) {
            return false;
        }
        true
    }

    /// One-line description of the active filters, e.g. for a status bar.
    pub fn describe(&self) -> String {
        let mut parts = vec![format!("Status: {}", self.status.label())];
        parts.push(format!(
            "Priority: {}",
            self.priority.map_or("All", |p| p.label())
        ));
        parts.push(format!(
            "Category: {}",
            self.category.map_or("All", |c| c.label())
        ));
        parts.push(format!("Sort: {}", self.sort.label()));
        if !self.search.is_empty() {
            parts.push(format!("Search: '{}'", self.search));
        }
        parts.join(" | ")
    }
}

/// Filter and sort `tasks` for display. Storage order is never changed.
pub fn project<'a>(tasks: &'a [Task], view: &ViewState) -> Vec<&'a Task> {
    let mut shown: Vec<&Task> = tasks.iter().filter(|t| view.matches(t)).collect();
    sort_tasks(&mut shown, view.sort);
    shown
}

/// Stable sort of a projected list.
pub fn sort_tasks(tasks: &mut [&Task], key: SortKey) {
    match key {
        SortKey::DateDesc => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::DateAsc => tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::Priority => tasks.sort_by_key(|t| t.priority.rank()),
        SortKey::Alphabetical => tasks.sort_by(|a, b| locale_cmp(&a.text, &b.text)),
    }
}

/// Dictionary-style comparison of two strings.
///
/// Letters compare case-insensitively first; on a tie lowercase sorts before
/// uppercase, and finally raw code points decide so the order is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let fold = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<String>();
    fold(a)
        .cmp(&fold(b))
        .then_with(|| {
            let case_rank = |s: &str| s.chars().map(|c| c.is_uppercase()).collect::<Vec<_>>();
            case_rank(a).cmp(&case_rank(b))
        })
        .then_with(|| a.cmp(b))
}

/// Whole-collection counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Rounded completion percentage, 0 for an empty collection.
    pub percent: u32,
}

impl Stats {
    pub fn compute(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        Stats {
            total,
            completed,
            pending: total - completed,
            percent: completion_percent(completed, total),
        }
    }
}

/// `round(100 * completed / total)` with halves rounded up, 0 when empty.
pub fn completion_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed * 200 + total) / (total * 2)) as u32
}

/// Task counts per priority, in [`Priority::ALL`] order.
pub fn priority_tally(tasks: &[Task]) -> [usize; 3] {
    let mut counts = [0; 3];
    for t in tasks {
        counts[t.priority.index()] += 1;
    }
    counts
}

/// Task counts per category, in [`Category::ALL`] order.
pub fn category_tally(tasks: &[Task]) -> [usize; 5] {
    let mut counts = [0; 5];
    for t in tasks {
        counts[t.category.index()] += 1;
    }
    counts
}

/// True when an incomplete task's due date is before `today`.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.completed && task.due_date.is_some_and(|d| d < today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 9, minute, 0).unwrap()
    }

    fn task(id: u64, text: &str, category: Category, priority: Priority, completed: bool) -> Task {
        Task {
            id,
            text: text.into(),
            completed,
            category,
            priority,
            due_date: None,
            created_at: at(id as u32),
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "Write report", Category::Work, Priority::High, false),
            task(2, "buy Milk", Category::Shopping, Priority::Low, true),
            task(3, "Gym session", Category::Health, Priority::Medium, false),
            task(4, "Call plumber", Category::Personal, Priority::High, true),
            task(5, "apples", Category::Shopping, Priority::Medium, false),
        ]
    }

    fn ids(tasks: &[&Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_default_view_is_newest_first() {
        let tasks = sample();
        assert_eq!(ids(&project(&tasks, &ViewState::default())), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_date_asc() {
        let tasks = sample();
        let view = ViewState::with_sort(SortKey::DateAsc);
        assert_eq!(ids(&project(&tasks, &view)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_priority_sort_is_stable() {
        let tasks = sample();
        let view = ViewState::with_sort(SortKey::Priority);
        // High: 1, 4; Medium: 3, 5; Low: 2 (insertion order within a rank).
        assert_eq!(ids(&project(&tasks, &view)), vec![1, 4, 3, 5, 2]);
    }

    #[test]
    fn test_alphabetical_ignores_case() {
        let tasks = sample();
        let view = ViewState::with_sort(SortKey::Alphabetical);
        assert_eq!(ids(&project(&tasks, &view)), vec![5, 2, 4, 3, 1]);
    }

    #[test]
    fn test_locale_cmp_is_total() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("Apple", "apple"), Ordering::Greater);
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_status_filters_partition_collection() {
        let tasks = sample();
        let mut view = ViewState::default();
        view.status = StatusFilter::Completed;
        let done: HashSet<u64> = ids(&project(&tasks, &view)).into_iter().collect();
        view.status = StatusFilter::Pending;
        let open: HashSet<u64> = ids(&project(&tasks, &view)).into_iter().collect();
        view.status = StatusFilter::All;
        let all: HashSet<u64> = ids(&project(&tasks, &view)).into_iter().collect();

        assert!(done.is_disjoint(&open));
        assert_eq!(done.union(&open).copied().collect::<HashSet<_>>(), all);
        assert_eq!(all.len(), tasks.len());
    }

    #[test]
    fn test_filters_combine() {
        let tasks = sample();
        let view = ViewState {
            status: StatusFilter::Pending,
            category: Some(Category::Shopping),
            ..Default::default()
        };
        assert_eq!(ids(&project(&tasks, &view)), vec![5]);

        let view = ViewState {
            priority: Some(Priority::High),
            search: "PLUMB".into(),
            ..Default::default()
        };
        assert_eq!(ids(&project(&tasks, &view)), vec![4]);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let tasks = sample();
        assert_eq!(project(&tasks, &ViewState::default()).len(), 5);
    }

    #[test]
    fn test_search_whitespace_is_significant() {
        let mut milk = sample().remove(0);
        milk.text = "milk".into();
        let tasks = vec![milk];
        let view = ViewState {
            search: " milk".into(),
            ..Default::default()
        };
        assert!(project(&tasks, &view).is_empty());

        let view = ViewState {
            search: "MIL".into(),
            ..Default::default()
        };
        assert_eq!(project(&tasks, &view).len(), 1);
    }

    #[test]
    fn test_projection_leaves_storage_order() {
        let tasks = sample();
        let _ = project(&tasks, &ViewState::with_sort(SortKey::Alphabetical));
        assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_stats_ignore_filters() {
        let tasks = sample();
        let stats = Stats::compute(&tasks);
        assert_eq!(
            stats,
            Stats {
                total: 5,
                completed: 2,
                pending: 3,
                percent: 40
            }
        );
        assert_eq!(priority_tally(&tasks), [2, 2, 1]);
        assert_eq!(category_tally(&tasks), [1, 1, 2, 1, 0]);
    }

    #[test]
    fn test_completion_percent_rounding() {
        assert_eq!(completion_percent(0, 0), 0);
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(2, 3), 67);
        assert_eq!(completion_percent(1, 8), 13); // 12.5 rounds up
        assert_eq!(completion_percent(4, 4), 100);
        for total in 1..20 {
            for completed in 0..=total {
                let s = Stats::compute(
                    &(0..total)
                        .map(|i| task(i as u64, "t", Category::Other, Priority::Low, i < completed))
                        .collect::<Vec<_>>(),
                );
                assert_eq!(s.completed + s.pending, s.total);
                let expected = (100.0 * completed as f64 / total as f64).round() as u32;
                assert_eq!(s.percent, expected);
            }
        }
    }

    #[test]
    fn test_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        let mut t = task(1, "x", Category::Work, Priority::Low, false);
        assert!(!is_overdue(&t, today));
        t.due_date = NaiveDate::from_ymd_opt(2024, 4, 10);
        assert!(!is_overdue(&t, today));
        t.due_date = NaiveDate::from_ymd_opt(2024, 4, 9);
        assert!(is_overdue(&t, today));
        t.completed = true;
        assert!(!is_overdue(&t, today));
    }

    #[test]
    fn test_cycling_and_describe() {
        let mut view = ViewState::default();
        view.cycle_status();
        view.cycle_priority();
        view.cycle_category();
        view.cycle_sort();
        assert_eq!(view.status, StatusFilter::Completed);
        assert_eq!(view.priority, Some(Priority::High));
        assert_eq!(view.category, Some(Category::Work));
        assert_eq!(view.sort, SortKey::DateAsc);
        assert_eq!(
            view.describe(),
            "Status: Completed | Priority: High | Category: Work | Sort: Oldest First"
        );
    }
}

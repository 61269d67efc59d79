//! Render engine: list markup, chart datasets and counters.
//!
//! The same projection feeds three outputs: the HTML list written by
//! `tb export`, the plain-text table printed by `tb list`, and the chart
//! datasets used both by the exported page and by the dashboard.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;

use crate::fields::{Category, Priority};
use crate::store::DELETE_CONFIRM;
use crate::task::Task;
use crate::view::{category_tally, is_overdue, priority_tally, Stats};

/// Replace the five HTML metacharacters with entities.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Format a due date with a chrono strftime pattern.
///
/// Falls back to ISO `YYYY-MM-DD` when the pattern cannot be rendered.
pub fn format_due(date: NaiveDate, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(date_format)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// Markup for the task list region.
///
/// Each row carries `data-id` and `data-action` attributes; [`export_page`]
/// binds them with one delegated click handler on the list.
pub fn render_task_list(tasks: &[&Task], today: NaiveDate, date_format: &str) -> String {
    if tasks.is_empty() {
        return "<div class=\"empty-state\">\n    <p>📭 No tasks found</p>\n</div>\n".to_string();
    }
    let mut out = String::new();
    for task in tasks {
        let mut classes = vec!["task-item"];
        if task.completed {
            classes.push("completed");
        }
        classes.push(task.priority.as_str());

        let _ = writeln!(out, "<li class=\"{}\" data-id=\"{}\">", classes.join(" "), task.id);
        let _ = writeln!(
            out,
            "    <input type=\"checkbox\" data-action=\"toggle\"{}>",
            if task.completed { " checked" } else { "" }
        );
        out.push_str("    <div class=\"task-content\">\n");
        let _ = writeln!(out, "        <div class=\"task-text\">{}</div>", escape_html(&task.text));
        out.push_str("        <div class=\"task-meta\">\n");
        let _ = writeln!(
            out,
            "            <span class=\"task-badge category-badge\">{} {}</span>",
            task.category.emoji(),
            task.category.as_str()
        );
        let _ = writeln!(
            out,
            "            <span class=\"task-badge priority-badge\">{} {}</span>",
            task.priority.emoji(),
            task.priority.as_str()
        );
        if let Some(due) = task.due_date {
            let class = if is_overdue(task, today) { "due-date passed" } else { "due-date" };
            let _ = writeln!(
                out,
                "            <span class=\"{}\">📅 {}</span>",
                class,
                escape_html(&format_due(due, date_format))
            );
        }
        out.push_str("        </div>\n    </div>\n");
        out.push_str("    <div class=\"task-actions\">\n");
        out.push_str("        <button class=\"delete-btn\" data-action=\"delete\">Delete</button>\n");
        out.push_str("    </div>\n</li>\n");
    }
    out
}

/// Chart type understood by the page's charting library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Bar,
    Pie,
}

/// One chart's labels, values and colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub kind: ChartKind,
    pub labels: Vec<&'static str>,
    pub data: Vec<usize>,
    pub background: Vec<&'static str>,
    pub border: Vec<&'static str>,
}

/// The three dashboard charts, always computed over the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charts {
    pub status: ChartData,
    pub priority: ChartData,
    pub category: ChartData,
}

impl Charts {
    pub fn compute(tasks: &[Task]) -> Self {
        let stats = Stats::compute(tasks);
        Charts {
            status: ChartData {
                kind: ChartKind::Doughnut,
                labels: vec!["Pending", "Completed"],
                data: vec![stats.pending, stats.completed],
                background: vec!["rgba(255, 193, 7, 0.8)", "rgba(76, 175, 80, 0.8)"],
                border: vec!["rgba(255, 193, 7, 1)", "rgba(76, 175, 80, 1)"],
            },
            priority: ChartData {
                kind: ChartKind::Bar,
                labels: Priority::ALL.iter().map(|p| p.label()).collect(),
                data: priority_tally(tasks).to_vec(),
                background: Priority::ALL.iter().map(|p| priority_fill(*p)).collect(),
                border: Priority::ALL.iter().map(|p| priority_border(*p)).collect(),
            },
            category: ChartData {
                kind: ChartKind::Pie,
                labels: Category::ALL.iter().map(|c| c.label()).collect(),
                data: category_tally(tasks).to_vec(),
                background: Category::ALL.iter().map(|c| category_fill(*c)).collect(),
                border: Category::ALL.iter().map(|c| category_border(*c)).collect(),
            },
        }
    }
}

pub fn priority_fill(p: Priority) -> &'static str {
    match p {
        Priority::High => "rgba(255, 107, 107, 0.8)",
        Priority::Medium => "rgba(255, 165, 0, 0.8)",
        Priority::Low => "rgba(76, 175, 80, 0.8)",
    }
}

pub fn priority_border(p: Priority) -> &'static str {
    match p {
        Priority::High => "#ff6b6b",
        Priority::Medium => "#ffa500",
        Priority::Low => "#4caf50",
    }
}

pub fn category_fill(c: Category) -> &'static str {
    match c {
        Category::Work => "rgba(52, 168, 224, 0.8)",
        Category::Personal => "rgba(156, 39, 176, 0.8)",
        Category::Shopping => "rgba(244, 67, 54, 0.8)",
        Category::Health => "rgba(76, 175, 80, 0.8)",
        Category::Other => "rgba(158, 158, 158, 0.8)",
    }
}

pub fn category_border(c: Category) -> &'static str {
    match c {
        Category::Work => "#34a8e0",
        Category::Personal => "#9c27b0",
        Category::Shopping => "#f44336",
        Category::Health => "#4caf50",
        Category::Other => "#9e9e9e",
    }
}

/// Counter texts in display order: total, completed, pending, progress.
pub fn counters(stats: &Stats) -> [(&'static str, String); 4] {
    [
        ("Total", stats.total.to_string()),
        ("Completed", stats.completed.to_string()),
        ("Pending", stats.pending.to_string()),
        ("Progress", format!("{}%", stats.percent)),
    ]
}

/// A standalone page with counters, the list and the chart datasets.
pub fn export_page(all: &[Task], shown: &[&Task], today: NaiveDate, date_format: &str) -> String {
    let stats = Stats::compute(all);
    let charts = Charts::compute(all);
    let charts_json = serde_json::to_string(&charts).unwrap_or_else(|_| "{}".to_string());

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    out.push_str("<title>Task Board</title>\n");
    out.push_str("<script src=\"https://cdn.jsdelivr.net/npm/chart.js\"></script>\n</head>\n<body>\n");
    out.push_str("<section class=\"stats\">\n");
    for (label, value) in counters(&stats) {
        let id = label.to_lowercase();
        let _ = writeln!(
            out,
            "    <div class=\"stat\"><span id=\"{id}Count\">{value}</span> {label}</div>"
        );
    }
    out.push_str("</section>\n<ul id=\"taskList\">\n");
    out.push_str(&render_task_list(shown, today, date_format));
    out.push_str("</ul>\n");
    out.push_str("<canvas id=\"taskChart\"></canvas>\n<canvas id=\"priorityChart\"></canvas>\n<canvas id=\"categoryChart\"></canvas>\n");
    // `</` cannot appear inside the JSON since labels and colors are fixed.
    let _ = writeln!(out, "<script>\nconst charts = {charts_json};");
    out.push_str(
        "for (const [id, c] of [['taskChart', charts.status], ['priorityChart', charts.priority], ['categoryChart', charts.category]]) {\n    new Chart(document.getElementById(id), { type: c.kind, data: { labels: c.labels, datasets: [{ data: c.data, backgroundColor: c.background, borderColor: c.border }] } });\n}\n</script>\n",
    );
    // The page is a snapshot: row actions update the markup only.
    let delete_confirm = serde_json::to_string(DELETE_CONFIRM).unwrap_or_else(|_| "\"\"".to_string());
    let _ = writeln!(
        out,
        "<script>\ndocument.getElementById('taskList').addEventListener('click', (e) => {{\n    const action = e.target.dataset.action;\n    const row = e.target.closest('li[data-id]');\n    if (!action || !row) return;\n    if (action === 'toggle') row.classList.toggle('completed', e.target.checked);\n    if (action === 'delete' && confirm({delete_confirm})) row.remove();\n}});\n</script>"
    );
    out.push_str("</body>\n</html>\n");
    out
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task], today: NaiveDate, date_format: &str) {
    print!("{}", format_table(tasks, today, date_format));
}

/// Build the text printed by [`print_table`].
pub fn format_table(tasks: &[&Task], today: NaiveDate, date_format: &str) -> String {
    if tasks.is_empty() {
        return "📭 No tasks found\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:<4} {:<12} {:<10} {:<12} {}",
        "ID", "Done", "Category", "Priority", "Due", "Task"
    );
    for t in tasks {
        let due = match t.due_date {
            Some(d) if is_overdue(t, today) => format!("{}!", format_due(d, date_format)),
            Some(d) => format_due(d, date_format),
            None => "-".into(),
        };
        let _ = writeln!(
            out,
            "{:<14} {:<4} {:<12} {:<10} {:<12} {}",
            t.id,
            if t.completed { "[x]" } else { "[ ]" },
            t.category.as_str(),
            t.priority.as_str(),
            due,
            truncate(&t.text, 60)
        );
    }
    out
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

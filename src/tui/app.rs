//! Main application logic for the terminal dashboard.
//!
//! This module contains the `App` struct which owns the task store and the
//! current view state, maps key presses onto store mutations and view
//! changes, and redraws the list, counters and charts after every event.

use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::config::Config;
use crate::db::KvStore;
use crate::error::{Error, Result};
use crate::fields::{Category, Priority};
use crate::render::{counters, format_due, Charts};
use crate::store::{Answer, TaskStore};
use crate::task::Task;
use crate::tui::{
    colors::{category_color, priority_color, AMBER, DARK_PURPLE, DARK_RED, GREEN},
    enums::{AppState, PendingAction},
    task_form::{TaskForm, CATEGORY_FIELD, DUE_FIELD, PRIORITY_FIELD, TEXT_FIELD},
    utils::centered_rect,
};
use crate::view::{is_overdue, project, Stats, ViewState};

/// Dashboard state.
///
/// Every handler runs to completion (store mutation, save, projection) before
/// the next key is read.
pub struct App<S: KvStore> {
    state: AppState,
    store: TaskStore<S>,
    config: Config,
    view: ViewState,
    task_list_state: TableState,
    filtered_tasks: Vec<u64>,
    task_form: TaskForm,
    status_message: String,
    search_active: bool,
    pending: Option<PendingAction>,
    dialog_text: String,
    /// Screen to go back to once a notice is dismissed.
    notice_return: AppState,
    today: NaiveDate,
}

impl<S: KvStore> App<S> {
    /// Create a dashboard over an opened store.
    pub fn new(store: TaskStore<S>, config: Config) -> Self {
        let mut app = App {
            state: AppState::TaskList,
            view: ViewState::with_sort(config.defaults.sort),
            task_form: TaskForm::new(&config.defaults),
            store,
            config,
            task_list_state: TableState::default(),
            filtered_tasks: Vec::new(),
            status_message: String::new(),
            search_active: false,
            pending: None,
            dialog_text: String::new(),
            notice_return: AppState::TaskList,
            today: Local::now().date_naive(),
        };
        app.update_filtered_tasks();
        app
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Ids of the displayed tasks, in display order.
    pub fn filtered_tasks(&self) -> &[u64] {
        &self.filtered_tasks
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.task_list_state
            .selected()
            .and_then(|idx| self.filtered_tasks.get(idx))
            .copied()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Text of the open confirmation or notice dialog.
    pub fn dialog_text(&self) -> &str {
        &self.dialog_text
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// Recompute the projection. Attempts to preserve the selection.
    fn update_filtered_tasks(&mut self) {
        let old_selected_id = self.selected_id();
        let old_idx = self.task_list_state.selected().unwrap_or(0);

        self.filtered_tasks = project(self.store.tasks(), &self.view)
            .into_iter()
            .map(|t| t.id)
            .collect();

        let new_idx = if self.filtered_tasks.is_empty() {
            None
        } else {
            old_selected_id
                .and_then(|id| self.filtered_tasks.iter().position(|&t| t == id))
                .or(Some(old_idx.min(self.filtered_tasks.len() - 1)))
        };
        self.task_list_state.select(new_idx);
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn show_notice(&mut self, message: &str, return_to: AppState) {
        self.dialog_text = message.to_string();
        self.notice_return = return_to;
        self.state = AppState::Notice;
    }

    fn report_error(&mut self, err: Error) {
        self.set_status_message(format!("Error: {err}"));
    }

    /// Dispatch one key press. Returns true when the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && matches!(key, KeyCode::Char('c') | KeyCode::Char('q')) {
            return true;
        }
        match self.state {
            AppState::TaskList => return self.handle_task_list_input(key),
            AppState::AddTask => self.handle_form_input(key),
            AppState::Help => self.state = AppState::TaskList,
            AppState::Confirm => self.handle_confirm_input(key),
            AppState::Notice => {
                if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.state = self.notice_return;
                }
            }
        }
        false
    }

    /// Handle keyboard input when in the task list view.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input(&mut self, key: KeyCode) -> bool {
        if self.search_active {
            match key {
                KeyCode::Esc => {
                    self.search_active = false;
                    self.view.search.clear();
                    self.update_filtered_tasks();
                    self.status_message.clear();
                }
                KeyCode::Enter => {
                    self.search_active = false;
                    if self.view.search.is_empty() {
                        self.set_status_message("Search cleared");
                    } else {
                        self.set_status_message(format!(
                            "Search applied: '{}' ({} tasks)",
                            self.view.search,
                            self.filtered_tasks.len()
                        ));
                    }
                }
                KeyCode::Backspace => {
                    if self.view.search.pop().is_some() {
                        self.update_filtered_tasks();
                    }
                }
                KeyCode::Char(c) => {
                    self.view.search.push(c);
                    self.update_filtered_tasks();
                }
                _ => {}
            }
            return false;
        }

        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.view.search.is_empty() {
                    return true;
                }
                self.view.search.clear();
                self.update_filtered_tasks();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected > 0 {
                        self.task_list_state.select(Some(selected - 1));
                    }
                } else if !self.filtered_tasks.is_empty() {
                    self.task_list_state.select(Some(0));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected + 1 < self.filtered_tasks.len() {
                        self.task_list_state.select(Some(selected + 1));
                    }
                } else if !self.filtered_tasks.is_empty() {
                    self.task_list_state.select(Some(0));
                }
            }
            KeyCode::Char('a') => {
                self.task_form.reset();
                self.state = AppState::AddTask;
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                if let Some(id) = self.selected_id() {
                    match self.store.toggle(id) {
                        Ok(Some(true)) => self.set_status_message("Task completed"),
                        Ok(Some(false)) => self.set_status_message("Task reopened"),
                        Ok(None) => {}
                        Err(e) => self.report_error(e),
                    }
                    self.update_filtered_tasks();
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    // Probe with a declining prompt: a no-op that tells us what to ask.
                    let mut probe = Answer::no();
                    match self.store.delete(id, &mut probe) {
                        Ok(_) => self.open_dialog(probe, PendingAction::Delete(id)),
                        Err(e) => self.report_error(e),
                    }
                }
            }
            KeyCode::Char('C') => {
                let mut probe = Answer::no();
                match self.store.clear_all(&mut probe) {
                    Ok(_) => self.open_dialog(probe, PendingAction::ClearAll),
                    Err(e) => self.report_error(e),
                }
            }
            KeyCode::Char('f') => {
                self.view.cycle_status();
                self.update_filtered_tasks();
            }
            KeyCode::Char('p') => {
                self.view.cycle_priority();
                self.update_filtered_tasks();
            }
            KeyCode::Char('c') => {
                self.view.cycle_category();
                self.update_filtered_tasks();
            }
            KeyCode::Char('s') => {
                self.view.cycle_sort();
                self.update_filtered_tasks();
                self.set_status_message(format!("Sorted: {}", self.view.sort.label()));
            }
            KeyCode::Char('/') => {
                self.search_active = true;
                self.set_status_message("Search: type to filter by text, Enter to keep, Esc to clear");
            }
            KeyCode::Char('r') => {
                match self.store.reload() {
                    Ok(()) => self.set_status_message("Tasks reloaded"),
                    Err(e) => self.report_error(e),
                }
                self.update_filtered_tasks();
            }
            KeyCode::Char('h') | KeyCode::F(1) => {
                self.state = AppState::Help;
            }
            _ => {}
        }
        false
    }

    /// Turn what the store asked or said during a probe into a dialog.
    fn open_dialog(&mut self, probe: Answer, action: PendingAction) {
        if let Some(notice) = probe.notices.first() {
            self.show_notice(notice, AppState::TaskList);
        } else if let Some(question) = probe.asked.first() {
            self.dialog_text = question.clone();
            self.pending = Some(action);
            self.state = AppState::Confirm;
        }
    }

    /// Handle keyboard input in the confirmation dialog.
    fn handle_confirm_input(&mut self, key: KeyCode) {
        let accepted = match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
            _ => return,
        };
        self.state = AppState::TaskList;
        let Some(action) = self.pending.take() else {
            return;
        };
        if !accepted {
            debug!(?action, "dialog declined");
            return;
        }
        let mut answer = Answer::yes();
        let result = match action {
            PendingAction::Delete(id) => self.store.delete(id, &mut answer).map(|removed| {
                if removed {
                    "Task deleted".to_string()
                } else {
                    String::new()
                }
            }),
            PendingAction::ClearAll => self
                .store
                .clear_all(&mut answer)
                .map(|n| format!("Deleted {n} task(s)")),
        };
        match result {
            Ok(msg) => self.set_status_message(msg),
            Err(e) => self.report_error(e),
        }
        self.update_filtered_tasks();
    }

    /// Handle keyboard input in the add form.
    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.state = AppState::TaskList,
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.handle_left_right(false),
            KeyCode::Right => self.task_form.handle_left_right(true),
            KeyCode::Backspace => self.task_form.handle_backspace(),
            KeyCode::Delete => self.task_form.handle_delete(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => self.task_form.handle_char(c),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let input = match self.task_form.to_new_task(self.today) {
            Ok(input) => input,
            Err(e) => {
                self.show_notice(&e.to_string(), AppState::AddTask);
                return;
            }
        };
        let mut answer = Answer::no();
        match self.store.add(input, &mut answer) {
            Ok(Some(id)) => {
                self.task_form.reset();
                self.state = AppState::TaskList;
                self.update_filtered_tasks();
                if let Some(idx) = self.filtered_tasks.iter().position(|&t| t == id) {
                    self.task_list_state.select(Some(idx));
                }
                self.set_status_message("Task added");
            }
            Ok(None) => {
                let notice = answer.notices.first().cloned().unwrap_or_default();
                self.show_notice(&notice, AppState::AddTask);
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Header with the four counters.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let stats = Stats::compute(self.store.tasks());
        let mut spans = vec![
            Span::styled("TASK BOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   "),
        ];
        for (label, value) in counters(&stats) {
            spans.push(Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)));
            spans.push(Span::styled(value, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)));
            spans.push(Span::raw("   "));
        }
        let header = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Render the task list, or the empty state when nothing matches.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(
                "Tasks ({}/{}) - Press 'h' for help",
                self.filtered_tasks.len(),
                self.store.len()
            ))
            .title_bottom(Line::from(self.view.describe()).alignment(Alignment::Center));

        if self.filtered_tasks.is_empty() {
            let empty = Paragraph::new(vec![Line::from(""), Line::from("📭 No tasks found")])
                .block(block)
                .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        }

        let header = Row::new(["", "Task", "Category", "Priority", "Due"].map(|h| {
            Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
        }))
        .style(Style::default().bg(DARK_PURPLE).fg(Color::White))
        .height(1);

        let date_format = &self.config.display.date_format;
        let rows: Vec<Row> = self
            .filtered_tasks
            .iter()
            .filter_map(|&id| self.store.get(id))
            .map(|task| task_row(task, self.today, date_format))
            .collect();

        let widths = [
            Constraint::Length(3),
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(12),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.task_list_state);
    }

    /// Status gauge, priority chart and category chart.
    fn render_charts(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(5), Constraint::Min(6)])
            .split(area);

        let stats = Stats::compute(self.store.tasks());
        let charts = Charts::compute(self.store.tasks());

        let ratio = if stats.total == 0 {
            0.0
        } else {
            stats.completed as f64 / stats.total as f64
        };
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .gauge_style(Style::default().fg(GREEN).bg(AMBER))
            .ratio(ratio)
            .label(format!(
                "{} {} / {} {}",
                charts.status.data[1], charts.status.labels[1], charts.status.data[0], charts.status.labels[0]
            ));
        f.render_widget(gauge, chunks[0]);

        let priority_bars: Vec<Bar> = Priority::ALL
            .iter()
            .map(|p| {
                Bar::default()
                    .label(Line::from(charts.priority.labels[p.index()]))
                    .value(charts.priority.data[p.index()] as u64)
                    .style(Style::default().fg(priority_color(*p)))
            })
            .collect();
        let priority_chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Priority"))
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .data(BarGroup::default().bars(&priority_bars));
        f.render_widget(priority_chart, chunks[1]);

        let inner_width = chunks[2].width.saturating_sub(2);
        let bar_width = (inner_width / Category::ALL.len() as u16).saturating_sub(1).max(1);
        let category_bars: Vec<Bar> = Category::ALL
            .iter()
            .map(|c| {
                Bar::default()
                    .label(Line::from(charts.category.labels[c.index()]))
                    .value(charts.category.data[c.index()] as u64)
                    .style(Style::default().fg(category_color(*c)))
            })
            .collect();
        let category_chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Category"))
            .bar_width(bar_width)
            .bar_gap(1)
            .data(BarGroup::default().bars(&category_bars));
        f.render_widget(category_chart, chunks[2]);
    }

    /// Render the add-task form.
    fn render_task_form(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 60, area);
        f.render_widget(Clear, area);
        let block = Block::default().borders(Borders::ALL).title("Add Task");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let focus = |field: usize| {
            if self.task_form.current_field == field {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            }
        };

        let input_width = chunks[0].width.saturating_sub(2);
        let (text_scroll, text_col) = self.task_form.text.viewport(input_width);
        let (due_scroll, due_col) = self.task_form.due.viewport(input_width);

        let text = Paragraph::new(self.task_form.text.value.as_str())
            .scroll((0, text_scroll))
            .block(Block::default().borders(Borders::ALL).title("Task").border_style(focus(TEXT_FIELD)));
        f.render_widget(text, chunks[0]);

        let category = self.task_form.selected_category();
        let category_sel = Paragraph::new(format!("◀ {} {} ▶", category.emoji(), category.label())).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Category")
                .border_style(focus(CATEGORY_FIELD)),
        );
        f.render_widget(category_sel, chunks[1]);

        let priority = self.task_form.selected_priority();
        let priority_sel = Paragraph::new(format!("◀ {} {} ▶", priority.emoji(), priority.label())).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Priority")
                .border_style(focus(PRIORITY_FIELD)),
        );
        f.render_widget(priority_sel, chunks[2]);

        let due = Paragraph::new(self.task_form.due.value.as_str()).scroll((0, due_scroll)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Due (YYYY-MM-DD, today, friday, in 3d)")
                .border_style(focus(DUE_FIELD)),
        );
        f.render_widget(due, chunks[3]);

        let hint = Paragraph::new("Tab/↑↓ fields  ←→ change selection  Enter add  Esc cancel")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, chunks[4]);

        let cursor = match self.task_form.current_field {
            TEXT_FIELD => Some((chunks[0], text_col)),
            DUE_FIELD => Some((chunks[3], due_col)),
            _ => None,
        };
        if let Some((chunk, col)) = cursor {
            f.set_cursor_position((chunk.x + 1 + col, chunk.y + 1));
        }
    }

    /// Render the help screen with keyboard shortcuts.
    fn render_help(&self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("Task Board Help", bold)),
            Line::from(""),
            Line::from(Span::styled("Tasks:", bold)),
            Line::from("  ↑/↓, k/j     Move selection"),
            Line::from("  a            Add new task"),
            Line::from("  Space/x      Toggle completion"),
            Line::from("  d            Delete selected task"),
            Line::from("  C            Clear all tasks"),
            Line::from("  r            Reload from disk"),
            Line::from(""),
            Line::from(Span::styled("View:", bold)),
            Line::from("  f            Cycle status filter (All → Completed → Pending)"),
            Line::from("  p            Cycle priority filter"),
            Line::from("  c            Cycle category filter"),
            Line::from("  s            Cycle sort (Newest, Oldest, Priority, Alphabetical)"),
            Line::from("  /            Search task text"),
            Line::from(""),
            Line::from("  h/F1         Show this help"),
            Line::from("  q/Esc/Ctrl+C Quit"),
        ];
        let paragraph = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help - Press any key to return"))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render a confirmation or notice dialog over the list.
    fn render_dialog(&self, f: &mut Frame, area: Rect) {
        let (title, footer, bg) = match self.state {
            AppState::Confirm => ("Confirm Action", "Press 'y' to confirm, 'n' to cancel", DARK_RED),
            _ => ("Notice", "Press Enter to continue", DARK_PURPLE),
        };
        let area = centered_rect(50, 25, area);
        f.render_widget(Clear, area);
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.dialog_text.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(footer),
        ];
        let paragraph = Paragraph::new(text)
            .block(Block::default().title(title).borders(Borders::ALL).style(Style::default().bg(bg)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if self.search_active {
            format!("Search: {}▏ (Esc to clear, Enter to keep)", self.view.search)
        } else if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::TaskList => format!("Tasks: {} | Press 'h' for help", self.filtered_tasks.len()),
                AppState::AddTask => "Add New Task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
                AppState::Notice => "Notice".to_string(),
            }
        };
        let status = Paragraph::new(status_text).style(Style::default().bg(DARK_PURPLE).fg(Color::White));
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the view renderers.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        self.render_header(f, chunks[0]);

        if self.state == AppState::Help {
            self.render_help(f, chunks[1]);
        } else {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(chunks[1]);
            self.render_task_list(f, body[0]);
            self.render_charts(f, body[1]);

            match self.state {
                AppState::AddTask => self.render_task_form(f, chunks[1]),
                AppState::Confirm | AppState::Notice => self.render_dialog(f, chunks[1]),
                _ => {}
            }
        }

        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop for the dashboard.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.today = Local::now().date_naive();
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    self.status_message.clear();
                    if self.handle_key(key.code, key.modifiers) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

/// One table row: checkbox, text, badges and due date.
fn task_row<'a>(task: &'a Task, today: NaiveDate, date_format: &str) -> Row<'a> {
    let text_style = if task.completed {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    };
    let due_cell = match task.due_date {
        Some(d) if is_overdue(task, today) => Cell::from(format!("📅 {}", format_due(d, date_format)))
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Some(d) => Cell::from(format!("📅 {}", format_due(d, date_format))),
        None => Cell::from("-"),
    };
    Row::new(vec![
        Cell::from(if task.completed { "[x]" } else { "[ ]" }),
        Cell::from(task.text.as_str()).style(text_style),
        Cell::from(format!("{} {}", task.category.emoji(), task.category.as_str()))
            .style(Style::default().fg(category_color(task.category))),
        Cell::from(format!("{} {}", task.priority.emoji(), task.priority.as_str()))
            .style(Style::default().fg(priority_color(task.priority))),
        due_cell,
    ])
}

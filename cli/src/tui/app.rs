use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdeck_core::api::{
    normalize_title, partition, Notification, StoreEvent, StoreState, Task, TuiConfig,
};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Add(String),
    Toggle { id: String, completed: bool },
    Delete(String),
    Refresh,
    Quit,
}

pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

pub struct TuiApp {
    pub config: TuiConfig,
    pub service: String,
    /// Last snapshot of the store.
    pub view: StoreState,
    pub input_buffer: String,
    /// Byte offset into `input_buffer`, always on a char boundary.
    pub input_cursor: usize,
    pub selected: usize,
    pub toast: Option<Toast>,
    pub start: Instant,
    /// Set on submit, cleared when the store reports the add finished.
    /// Snapshots lag the spawned add, so they cannot gate a second Enter.
    pub add_pending: bool,
}

impl TuiApp {
    pub fn new(config: TuiConfig, service: String) -> Self {
        Self {
            config,
            service,
            view: StoreState {
                loading: true,
                ..StoreState::default()
            },
            input_buffer: String::new(),
            input_cursor: 0,
            selected: 0,
            toast: None,
            start: Instant::now(),
            add_pending: false,
        }
    }

    /// Tasks in display order: pending first, then completed.
    pub fn rows(&self) -> Vec<&Task> {
        let (mut pending, completed) = partition(&self.view.tasks);
        pending.extend(completed);
        pending
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.rows().get(self.selected).copied()
    }

    pub fn set_view(&mut self, view: StoreState) {
        // Keep the selection on the same task when the list reorders.
        let selected_id = self.selected_task().map(|t| t.id.clone());
        self.view = view;
        let rows = self.rows();
        self.selected = selected_id
            .and_then(|id| rows.iter().position(|t| t.id == id))
            .unwrap_or(self.selected)
            .min(rows.len().saturating_sub(1));
    }

    pub fn is_adding(&self) -> bool {
        self.add_pending || self.view.adding
    }

    pub fn on_store_event(&mut self, event: &StoreEvent) {
        if let StoreEvent::AddingChanged(false) = event {
            self.add_pending = false;
        }
    }

    /// Missed store events; trust the next snapshot instead.
    pub fn on_events_lagged(&mut self) {
        self.add_pending = false;
    }

    pub fn push_notification(&mut self, notification: Notification) {
        self.toast = Some(Toast {
            notification,
            shown_at: Instant::now(),
        });
    }

    pub fn expire_toast(&mut self) {
        let ttl = Duration::from_millis(self.config.toast_ms);
        if self
            .toast
            .as_ref()
            .is_some_and(|t| t.shown_at.elapsed() >= ttl)
        {
            self.toast = None;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if ctrl => Action::Quit,
            KeyCode::Char('r') if ctrl => Action::Refresh,
            KeyCode::Char('t') if ctrl => self.toggle_selected(),
            KeyCode::Char('d') if ctrl => self.delete_selected(),
            KeyCode::Tab => self.toggle_selected(),
            KeyCode::Delete => self.delete_selected(),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                let last = self.rows().len().saturating_sub(1);
                self.selected = (self.selected + 1).min(last);
                Action::None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.backspace();
                Action::None
            }
            KeyCode::Left => {
                self.input_cursor = prev_char_boundary(&self.input_buffer, self.input_cursor);
                Action::None
            }
            KeyCode::Right => {
                self.input_cursor = next_char_boundary(&self.input_buffer, self.input_cursor);
                Action::None
            }
            KeyCode::Home => {
                self.input_cursor = 0;
                Action::None
            }
            KeyCode::End => {
                self.input_cursor = self.input_buffer.len();
                Action::None
            }
            KeyCode::Char(ch) if !ctrl => {
                self.insert_char(ch);
                Action::None
            }
            _ => Action::None,
        }
    }

    /// The input stays put while an add is in flight.
    fn submit(&mut self) -> Action {
        if self.is_adding() {
            return Action::None;
        }
        let Some(title) = normalize_title(&self.input_buffer) else {
            return Action::None;
        };
        self.input_buffer.clear();
        self.input_cursor = 0;
        self.add_pending = true;
        Action::Add(title)
    }

    fn toggle_selected(&self) -> Action {
        match self.selected_task() {
            Some(task) if !self.view.busy.contains_key(&task.id) => Action::Toggle {
                id: task.id.clone(),
                completed: !task.completed,
            },
            _ => Action::None,
        }
    }

    fn delete_selected(&self) -> Action {
        match self.selected_task() {
            Some(task) if !self.view.busy.contains_key(&task.id) => Action::Delete(task.id.clone()),
            _ => Action::None,
        }
    }

    fn insert_char(&mut self, ch: char) {
        self.input_buffer.insert(self.input_cursor, ch);
        self.input_cursor += ch.len_utf8();
    }

    fn backspace(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        let prev = prev_char_boundary(&self.input_buffer, self.input_cursor);
        self.input_buffer.replace_range(prev..self.input_cursor, "");
        self.input_cursor = prev;
    }
}

fn prev_char_boundary(s: &str, idx: usize) -> usize {
    s[..idx]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(s: &str, idx: usize) -> usize {
    s[idx..]
        .chars()
        .next()
        .map(|ch| idx + ch.len_utf8())
        .unwrap_or(s.len())
}

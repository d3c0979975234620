//! Transient user-facing notifications.
//!
//! The store reports outcomes through a [`Notifier`]; how they are shown
//! (toast line, stderr, log) is up to the presentation layer.

mod sinks;

pub use sinks::{ChannelNotifier, NullNotifier, RecordingNotifier, TracingNotifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    /// The change was applied locally only.
    Demo,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Demo => "demo",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: &str, description: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    pub fn load_failed() -> Self {
        Self::new(
            NotificationKind::Error,
            "Error",
            "Failed to load tasks. Make sure your API is running.",
        )
    }

    pub fn task_added() -> Self {
        Self::new(
            NotificationKind::Success,
            "Task added",
            "Your new task has been created.",
        )
    }

    pub fn task_added_locally() -> Self {
        Self::new(
            NotificationKind::Demo,
            "Task added (demo)",
            "Running in demo mode - connect your API to persist tasks.",
        )
    }

    pub fn task_deleted() -> Self {
        Self::new(
            NotificationKind::Success,
            "Task deleted",
            "The task has been removed.",
        )
    }

    pub fn task_deleted_locally() -> Self {
        Self::new(
            NotificationKind::Demo,
            "Task deleted (demo)",
            "Running in demo mode.",
        )
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

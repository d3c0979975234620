use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of ids synthesised while the task service is unreachable.
pub const LOCAL_ID_PREFIX: &str = "local-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Informational only; never used for ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed: false,
            created_at: None,
        }
    }

    /// A task that only exists in this session, created when the service
    /// could not be reached.
    pub fn local(title: impl Into<String>) -> Self {
        Self {
            id: format!("{}{}", LOCAL_ID_PREFIX, uuid::Uuid::new_v4()),
            title: title.into(),
            completed: false,
            created_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    pub fn is_local(&self) -> bool {
        self.id.starts_with(LOCAL_ID_PREFIX)
    }
}

/// Partial update sent to the service; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(completed),
        }
    }

    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// Input boundary for titles: trimmed, and `None` when nothing is left.
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

//! Shapes exchanged with the task service.
//!
//! The service names the identifier `taskId`; locally it is `id`.

use serde::{Deserialize, Serialize};

use super::model::{normalize_title, Task, TaskPatch};

/// Element of the `GET /tasks` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTask {
    pub task_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl WireTask {
    /// `None` when the element carries no usable title.
    pub fn into_task(self) -> Option<Task> {
        let title = self.title.as_deref().and_then(normalize_title)?;
        Some(Task {
            id: self.task_id,
            title,
            completed: self.completed,
            created_at: self.created_at,
        })
    }
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskPayload {
    pub title: String,
}

/// Response of `POST /tasks`. Only `taskId` (and `createdAt` when present)
/// is taken from it; anything else the service echoes is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskResponse {
    pub task_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl CreateTaskResponse {
    /// A freshly created task is the requested title, not completed.
    pub fn into_task(self, requested_title: &str) -> Task {
        let title =
            normalize_title(requested_title).unwrap_or_else(|| requested_title.to_string());
        Task {
            id: self.task_id,
            title,
            completed: false,
            created_at: self.created_at,
        }
    }
}

/// Response of `PUT /tasks/{id}`.
///
/// Services disagree on whether this echoes `taskId` or `id`; both are
/// accepted, `taskId` first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskResponse {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl UpdateTaskResponse {
    pub fn into_update(self, requested_id: &str, patch: &TaskPatch) -> TaskUpdate {
        let id = self
            .task_id
            .or(self.id)
            .unwrap_or_else(|| requested_id.to_string());
        TaskUpdate {
            id,
            title: self
                .title
                .as_deref()
                .and_then(normalize_title)
                .or_else(|| patch.title.as_deref().and_then(normalize_title)),
            completed: self.completed.or(patch.completed).unwrap_or(false),
        }
    }
}

/// What the service acknowledged for an update. The title is only known
/// when the service echoes it or the patch carried one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    pub id: String,
    pub title: Option<String>,
    pub completed: bool,
}

impl From<&Task> for TaskUpdate {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: Some(task.title.clone()),
            completed: task.completed,
        }
    }
}

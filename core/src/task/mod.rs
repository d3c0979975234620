mod model;
mod summary;
pub mod wire;

pub use model::{normalize_title, Task, TaskPatch, LOCAL_ID_PREFIX};
pub use summary::{partition, TaskSummary};
pub use wire::{CreateTaskPayload, CreateTaskResponse, TaskUpdate, UpdateTaskResponse, WireTask};

use crate::error::TransportError;
use crate::task::{Task, TaskPatch, TaskUpdate};
use async_trait::async_trait;

pub type GatewayResult<T> = Result<T, TransportError>;

/// Remote task service boundary. Implementations translate wire shapes into
/// [`Task`]s and never retry or recover; failures are reported as
/// [`TransportError`] and handled by the caller.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    fn name(&self) -> &str;
    /// All tasks in service order, titles trimmed and non-empty.
    async fn list_tasks(&self) -> GatewayResult<Vec<Task>>;
    async fn create_task(&self, title: &str) -> GatewayResult<Task>;
    async fn update_task(&self, id: &str, patch: TaskPatch) -> GatewayResult<TaskUpdate>;
    async fn delete_task(&self, id: &str) -> GatewayResult<()>;
}

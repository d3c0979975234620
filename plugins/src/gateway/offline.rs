use async_trait::async_trait;
use taskdeck_core::api::{
    GatewayResult, Task, TaskGateway, TaskPatch, TaskUpdate, TransportError,
};

/// Gateway that never reaches a service, so every store mutation takes the
/// local path. Selected with `api.offline` or `--offline`.
pub struct OfflineGateway;

#[async_trait]
impl TaskGateway for OfflineGateway {
    fn name(&self) -> &str {
        "offline"
    }

    async fn list_tasks(&self) -> GatewayResult<Vec<Task>> {
        Err(TransportError::offline())
    }

    async fn create_task(&self, _title: &str) -> GatewayResult<Task> {
        Err(TransportError::offline())
    }

    async fn update_task(&self, _id: &str, _patch: TaskPatch) -> GatewayResult<TaskUpdate> {
        Err(TransportError::offline())
    }

    async fn delete_task(&self, _id: &str) -> GatewayResult<()> {
        Err(TransportError::offline())
    }
}

use super::http_client::HttpClient;
use async_trait::async_trait;
use taskdeck_core::api::{
    CreateTaskPayload, GatewayResult, Task, TaskGateway, TaskPatch, TaskUpdate,
};

/// [`TaskGateway`] backed by the remote task service.
pub struct HttpTaskGateway {
    client: HttpClient,
}

impl HttpTaskGateway {
    pub fn new(base_url: &str, api_key: String, timeout_ms: u64) -> anyhow::Result<Self> {
        let client = HttpClient::new(base_url, api_key, timeout_ms)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TaskGateway for HttpTaskGateway {
    fn name(&self) -> &str {
        "http"
    }

    async fn list_tasks(&self) -> GatewayResult<Vec<Task>> {
        let wire = self.client.list_tasks().await?;
        let tasks = wire
            .into_iter()
            .filter_map(|w| {
                let id = w.task_id.clone();
                let task = w.into_task();
                if task.is_none() {
                    tracing::warn!(
                        target: "taskdeck.gateway",
                        stage = "gateway.list.skip",
                        id = %id,
                        reason = "blank_title"
                    );
                }
                task
            })
            .collect();
        Ok(tasks)
    }

    async fn create_task(&self, title: &str) -> GatewayResult<Task> {
        let payload = CreateTaskPayload {
            title: title.to_string(),
        };
        let resp = self.client.create_task(&payload).await?;
        Ok(resp.into_task(title))
    }

    async fn update_task(&self, id: &str, patch: TaskPatch) -> GatewayResult<TaskUpdate> {
        let resp = self.client.update_task(id, &patch).await?;
        Ok(resp.into_update(id, &patch))
    }

    async fn delete_task(&self, id: &str) -> GatewayResult<()> {
        self.client.delete_task(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use taskdeck_core::api::{AddResult, NullNotifier, StoreOptions, TaskStore, TransportErrorKind};

    #[tokio::test]
    async fn list_maps_remote_field_names() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_body(r#"[{"taskId":"1","title":"Buy milk","completed":false}]"#)
            .create_async()
            .await;

        let gw = HttpTaskGateway::new(&server.url(), String::new(), 1_000).unwrap();
        let tasks = gw.list_tasks().await.unwrap();
        assert_eq!(tasks, vec![Task::new("1", "Buy milk")]);
    }

    #[tokio::test]
    async fn list_skips_elements_without_a_title() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_body(r#"[{"taskId":"1"},{"taskId":"2","title":"   "},{"taskId":"3","title":" Eggs "}]"#)
            .create_async()
            .await;

        let gw = HttpTaskGateway::new(&server.url(), String::new(), 1_000).unwrap();
        let tasks = gw.list_tasks().await.unwrap();
        assert_eq!(tasks, vec![Task::new("3", "Eggs")]);
    }

    #[tokio::test]
    async fn create_fills_title_and_completion_client_side() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/tasks")
            .with_status(200)
            .with_body(r#"{"taskId":"t-42","message":"created"}"#)
            .create_async()
            .await;

        let gw = HttpTaskGateway::new(&server.url(), String::new(), 1_000).unwrap();
        let task = gw.create_task("Write report").await.unwrap();
        assert_eq!(task, Task::new("t-42", "Write report"));
    }

    #[tokio::test]
    async fn create_ignores_echoed_title_and_completion() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/tasks")
            .with_status(200)
            .with_body(r#"{"taskId":"t1","title":"  other  ","completed":true}"#)
            .create_async()
            .await;

        let gw = HttpTaskGateway::new(&server.url(), String::new(), 1_000).unwrap();
        let task = gw.create_task("Write report").await.unwrap();
        assert_eq!(task, Task::new("t1", "Write report"));
    }

    #[tokio::test]
    async fn added_task_is_pending_with_requested_title() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/tasks")
            .with_status(201)
            .with_body(r#"{"taskId":"t1","title":"  other  ","completed":true}"#)
            .create_async()
            .await;

        let gw = HttpTaskGateway::new(&server.url(), String::new(), 1_000).unwrap();
        let store = TaskStore::new(
            Arc::new(gw),
            Arc::new(NullNotifier),
            StoreOptions::default(),
        );
        let result = store.add("  Write report ").await;
        assert_eq!(result, AddResult::Synced(Task::new("t1", "Write report")));
        assert_eq!(store.tasks().await, vec![Task::new("t1", "Write report")]);
    }

    #[tokio::test]
    async fn completion_only_update_without_echo_has_no_title() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PUT", "/tasks/1")
            .with_status(204)
            .create_async()
            .await;

        let gw = HttpTaskGateway::new(&server.url(), String::new(), 1_000).unwrap();
        let update = gw.update_task("1", TaskPatch::completed(false)).await.unwrap();
        assert_eq!(update.title, None);
        assert!(!update.completed);
    }

    #[tokio::test]
    async fn create_without_task_id_fails() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/tasks")
            .with_status(200)
            .with_body(r#"{"id":"t-42"}"#)
            .create_async()
            .await;

        let gw = HttpTaskGateway::new(&server.url(), String::new(), 1_000).unwrap();
        let err = gw.create_task("Write report").await.unwrap_err();
        assert_eq!(err.kind(), TransportErrorKind::Decode);
    }

    #[tokio::test]
    async fn update_response_with_remote_field_names() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PUT", "/tasks/1")
            .with_status(200)
            .with_body(r#"{"taskId":"1","title":"Buy milk","completed":true}"#)
            .create_async()
            .await;

        let gw = HttpTaskGateway::new(&server.url(), String::new(), 1_000).unwrap();
        let update = gw.update_task("1", TaskPatch::completed(true)).await.unwrap();
        assert_eq!(
            update,
            TaskUpdate {
                id: "1".into(),
                title: Some("Buy milk".into()),
                completed: true,
            }
        );
    }

    #[tokio::test]
    async fn update_response_with_local_field_names() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PUT", "/tasks/1")
            .with_status(200)
            .with_body(r#"{"id":"1","title":"Buy milk","completed":true}"#)
            .create_async()
            .await;

        let gw = HttpTaskGateway::new(&server.url(), String::new(), 1_000).unwrap();
        let update = gw.update_task("1", TaskPatch::completed(true)).await.unwrap();
        assert_eq!(update.id, "1");
        assert!(update.completed);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_a_status_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PUT", "/tasks/missing")
            .with_status(404)
            .with_body(r#"{"message":"Task not found"}"#)
            .create_async()
            .await;

        let gw = HttpTaskGateway::new(&server.url(), String::new(), 1_000).unwrap();
        let err = gw
            .update_task("missing", TaskPatch::completed(true))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), TransportErrorKind::Status);
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn delete_accepts_empty_body() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("DELETE", "/tasks/1")
            .with_status(204)
            .create_async()
            .await;

        let gw = HttpTaskGateway::new(&server.url(), String::new(), 1_000).unwrap();
        gw.delete_task("1").await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_on_list_is_a_transport_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let gw = HttpTaskGateway::new(&server.url(), String::new(), 1_000).unwrap();
        let err = gw.list_tasks().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}

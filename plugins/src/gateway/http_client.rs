use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use taskdeck_core::api::{
    CreateTaskPayload, CreateTaskResponse, TaskPatch, TransportError, TransportErrorKind,
    UpdateTaskResponse, WireTask,
};

const BODY_PREVIEW_LIMIT: usize = 512;

fn from_reqwest(err: reqwest::Error, url: &str) -> TransportError {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else if err.is_request() {
        TransportErrorKind::Request
    } else if err.is_body() {
        TransportErrorKind::Body
    } else if err.is_decode() {
        TransportErrorKind::Decode
    } else {
        TransportErrorKind::Unknown
    };
    let status = err.status().map(|s| s.as_u16());
    let mut out = TransportError::new(kind, err.to_string()).with_url(url);
    if let Some(status) = status {
        out = out.with_status(status);
    }
    out.with_source(err)
}

fn decode_error(status: u16, url: &str, err: serde_json::Error, preview: String) -> TransportError {
    let message = format!("failed to decode response body: {} | body={}", err, preview);
    TransportError::new(TransportErrorKind::Decode, message)
        .with_status(status)
        .with_url(url)
        .with_source(err)
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }

    if truncated {
        out.push_str("...");
    }

    out
}

/// Read a JSON body, treating any non-2xx status as a failure. An empty
/// body yields `T` decoded from `null`.
async fn parse_json_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, TransportError> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp.text().await.map_err(|err| from_reqwest(err, &url))?;

    if !status.is_success() {
        return Err(TransportError::status_error(
            status.as_u16(),
            url,
            preview_body(&body),
        ));
    }

    let value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str::<Value>(&body)
            .map_err(|err| decode_error(status.as_u16(), &url, err, preview_body(&body)))?
    };

    serde_json::from_value::<T>(value)
        .map_err(|err| decode_error(status.as_u16(), &url, err, preview_body(&body)))
}

async fn ensure_success(resp: reqwest::Response) -> Result<(), TransportError> {
    let status = resp.status();
    let url = resp.url().to_string();

    if status.is_success() {
        return Ok(());
    }

    let body = resp.text().await.map_err(|err| from_reqwest(err, &url))?;
    Err(TransportError::status_error(
        status.as_u16(),
        url,
        preview_body(&body),
    ))
}

/// Thin client for the `/tasks` resource.
#[derive(Clone)]
pub struct HttpClient {
    api_key: String,
    http: reqwest::Client,
    url_tasks: Url,
}

impl HttpClient {
    pub fn new(base_url: &str, api_key: String, timeout_ms: u64) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .default_headers(headers)
            .build()?;
        let normalized = base_url.trim().trim_end_matches('/');
        let url_tasks = Url::parse(&format!("{}/tasks", normalized))?;
        Ok(Self {
            api_key,
            http,
            url_tasks,
        })
    }

    pub fn tasks_url(&self) -> &str {
        self.url_tasks.as_str()
    }

    /// `{base}/tasks/{id}` with `id` encoded as a single path segment.
    fn task_url(&self, id: &str) -> Result<Url, TransportError> {
        let mut url = self.url_tasks.clone();
        url.path_segments_mut()
            .map_err(|_| {
                TransportError::new(TransportErrorKind::Request, "base url cannot carry a path")
                    .with_url(self.url_tasks.as_str())
            })?
            .push(id);
        Ok(url)
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.trim().is_empty() {
            req
        } else {
            req.bearer_auth(&self.api_key)
        }
    }

    pub async fn list_tasks(&self) -> Result<Vec<WireTask>, TransportError> {
        let url = self.url_tasks.as_str();
        tracing::debug!(target: "taskdeck.gateway", stage = "gateway.http.list.in", url = %url);
        let req = self.http.get(url);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| from_reqwest(err, url))?;
        let status = resp.status();
        let out: Vec<WireTask> = parse_json_response(resp).await?;
        tracing::debug!(
            target: "taskdeck.gateway",
            stage = "gateway.http.list.out",
            status = %status,
            count = out.len()
        );
        Ok(out)
    }

    pub async fn create_task(
        &self,
        payload: &CreateTaskPayload,
    ) -> Result<CreateTaskResponse, TransportError> {
        let url = self.url_tasks.as_str();
        tracing::debug!(
            target: "taskdeck.gateway",
            stage = "gateway.http.create.in",
            url = %url,
            title_len = payload.title.len()
        );
        let req = self.http.post(url).json(payload);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| from_reqwest(err, url))?;
        let status = resp.status();
        let out: CreateTaskResponse = parse_json_response(resp).await?;
        tracing::debug!(
            target: "taskdeck.gateway",
            stage = "gateway.http.create.out",
            status = %status,
            task_id = %out.task_id
        );
        Ok(out)
    }

    pub async fn update_task(
        &self,
        id: &str,
        patch: &TaskPatch,
    ) -> Result<UpdateTaskResponse, TransportError> {
        let url = self.task_url(id)?;
        tracing::debug!(
            target: "taskdeck.gateway",
            stage = "gateway.http.update.in",
            url = %url,
            completed = ?patch.completed,
            has_title = patch.title.is_some()
        );
        let req = self.http.put(url.clone()).json(patch);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| from_reqwest(err, url.as_str()))?;
        let status = resp.status();
        let out: Option<UpdateTaskResponse> = parse_json_response(resp).await?;
        tracing::debug!(
            target: "taskdeck.gateway",
            stage = "gateway.http.update.out",
            status = %status,
            empty_body = out.is_none()
        );
        Ok(out.unwrap_or_default())
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), TransportError> {
        let url = self.task_url(id)?;
        tracing::debug!(target: "taskdeck.gateway", stage = "gateway.http.delete.in", url = %url);
        let req = self.http.delete(url.clone());
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| from_reqwest(err, url.as_str()))?;
        let status = resp.status();
        ensure_success(resp).await?;
        tracing::debug!(target: "taskdeck.gateway", stage = "gateway.http.delete.out", status = %status);
        Ok(())
    }
}

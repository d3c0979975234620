#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use taskdeck_core::api::{
    GatewayResult, RecordingNotifier, StoreOptions, Task, TaskGateway, TaskPatch, TaskStore,
    TaskUpdate, TransportError, TransportErrorKind, WireTask,
};
use tokio::sync::Semaphore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(String),
    Update(String, TaskPatch),
    Delete(String),
}

/// In-memory stand-in for the task service.
pub struct ScriptedGateway {
    server: Mutex<Vec<Task>>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicUsize,
    fail_list: AtomicBool,
    fail_create: AtomicBool,
    fail_update: AtomicBool,
    fail_delete: AtomicBool,
    hold: AtomicBool,
    gate: Arc<Semaphore>,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            server: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            fail_list: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
            fail_update: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            hold: AtomicBool::new(false),
            gate: Arc::new(Semaphore::new(0)),
        })
    }

    /// Seed the service from its JSON list representation.
    pub fn with_wire_json(json: &str) -> Arc<Self> {
        let gw = Self::new();
        let wire: Vec<WireTask> = serde_json::from_str(json).expect("valid wire json");
        *gw.server.lock().unwrap() = wire.into_iter().filter_map(WireTask::into_task).collect();
        gw
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Arc<Self> {
        let gw = Self::new();
        *gw.server.lock().unwrap() = tasks;
        gw
    }

    pub fn fail_all(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
        self.fail_create.store(fail, Ordering::SeqCst);
        self.fail_update.store(fail, Ordering::SeqCst);
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent call wait until [`release`](Self::release).
    pub fn hold(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    pub fn release(&self, calls: usize) {
        self.gate.add_permits(calls);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn server_tasks(&self) -> Vec<Task> {
        self.server.lock().unwrap().clone()
    }

    async fn enter(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        if self.hold.load(Ordering::SeqCst) {
            self.gate.acquire().await.expect("gate open").forget();
        }
    }

    fn network_down() -> TransportError {
        TransportError::new(TransportErrorKind::Connect, "connection refused")
    }

    fn not_found(id: &str) -> TransportError {
        TransportError::status_error(404, format!("http://test/tasks/{id}"), "not found")
    }
}

#[async_trait]
impl TaskGateway for ScriptedGateway {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn list_tasks(&self) -> GatewayResult<Vec<Task>> {
        self.enter(Call::List).await;
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Self::network_down());
        }
        Ok(self.server_tasks())
    }

    async fn create_task(&self, title: &str) -> GatewayResult<Task> {
        self.enter(Call::Create(title.to_string())).await;
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(Self::network_down());
        }
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let task = Task::new(format!("srv-{n}"), title);
        self.server.lock().unwrap().insert(0, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &str, patch: TaskPatch) -> GatewayResult<TaskUpdate> {
        self.enter(Call::Update(id.to_string(), patch.clone())).await;
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(Self::network_down());
        }
        let mut server = self.server.lock().unwrap();
        let task = server
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        patch.apply(task);
        Ok(TaskUpdate::from(&*task))
    }

    async fn delete_task(&self, id: &str) -> GatewayResult<()> {
        self.enter(Call::Delete(id.to_string())).await;
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::network_down());
        }
        let mut server = self.server.lock().unwrap();
        let before = server.len();
        server.retain(|t| t.id != id);
        if server.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

pub fn store_with(gw: &Arc<ScriptedGateway>) -> (TaskStore, Arc<RecordingNotifier>) {
    store_with_options(gw, StoreOptions::default())
}

pub fn store_with_options(
    gw: &Arc<ScriptedGateway>,
    options: StoreOptions,
) -> (TaskStore, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let store = TaskStore::new(gw.clone(), notifier.clone(), options);
    (store, notifier)
}

pub fn task(id: &str, title: &str, completed: bool) -> Task {
    let mut t = Task::new(id, title);
    t.completed = completed;
    t
}

/// Poll until `check` holds, yielding to spawned tasks in between.
pub async fn wait_until<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        while !check().await {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached in time");
}

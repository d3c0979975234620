//! Task store handle.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use super::outcome::Outcome;
use super::types::{AddResult, BusyOp, MutationResult, RefreshResult, StoreEvent, StoreState};
use crate::config::StoreOptions;
use crate::gateway::TaskGateway;
use crate::notify::{Notification, Notifier};
use crate::task::{normalize_title, Task, TaskPatch, TaskSummary, TaskUpdate};

const EVENT_CAPACITY: usize = 256;

/// Cloneable handle to the session's task collection.
///
/// The state lock is never held across a gateway call, so operations on
/// different tasks can be in flight at the same time.
#[derive(Clone)]
pub struct TaskStore {
    inner: Arc<TaskStoreInner>,
}

struct TaskStoreInner {
    state: RwLock<StoreState>,
    gateway: Arc<dyn TaskGateway>,
    notifier: Arc<dyn Notifier>,
    options: StoreOptions,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl TaskStore {
    pub fn new(
        gateway: Arc<dyn TaskGateway>,
        notifier: Arc<dyn Notifier>,
        options: StoreOptions,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let inner = TaskStoreInner {
            state: RwLock::new(StoreState::default()),
            gateway,
            notifier,
            options,
            event_tx,
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn gateway_name(&self) -> &str {
        self.inner.gateway.name()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.event_tx.subscribe()
    }

    fn emit(&self, event: StoreEvent) {
        let _ = self.inner.event_tx.send(event);
    }

    pub async fn snapshot(&self) -> StoreState {
        self.inner.state.read().await.clone()
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.inner.state.read().await.tasks.clone()
    }

    pub async fn summary(&self) -> TaskSummary {
        TaskSummary::of(&self.inner.state.read().await.tasks)
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.state.read().await.loading
    }

    pub async fn is_adding(&self) -> bool {
        self.inner.state.read().await.adding
    }

    pub async fn busy_op(&self, id: &str) -> Option<BusyOp> {
        self.inner.state.read().await.busy.get(id).copied()
    }

    pub async fn is_busy(&self, id: &str) -> bool {
        self.busy_op(id).await.is_some()
    }

    /// Replace the collection with the service's list. On failure the
    /// collection is left empty.
    pub async fn refresh(&self) -> RefreshResult {
        self.inner.state.write().await.loading = true;
        self.emit(StoreEvent::Loading);
        tracing::debug!(target: "taskdeck.store", stage = "store.refresh.in", gateway = self.gateway_name());

        let outcome = Outcome::from(self.inner.gateway.list_tasks().await);
        self.commit_refresh(outcome).await
    }

    async fn commit_refresh(&self, outcome: Outcome<Vec<Task>>) -> RefreshResult {
        let (result, count) = {
            let mut state = self.inner.state.write().await;
            state.loading = false;
            match outcome {
                Outcome::Remote(tasks) => {
                    state.tasks = dedup_by_id(tasks);
                    (RefreshResult::Loaded(state.tasks.len()), state.tasks.len())
                }
                Outcome::Local(err) => {
                    tracing::warn!(target: "taskdeck.store", stage = "store.refresh.failed", error = %err);
                    state.tasks.clear();
                    (RefreshResult::Failed, 0)
                }
            }
        };

        if result == RefreshResult::Failed {
            self.inner.notifier.notify(Notification::load_failed());
        }
        tracing::debug!(target: "taskdeck.store", stage = "store.refresh.out", count = count);
        self.emit(StoreEvent::Replaced { count });
        result
    }

    /// Add a task at the top of the list. Blank titles and calls made while
    /// another add is in flight are rejected without touching the gateway.
    pub async fn add(&self, raw_title: &str) -> AddResult {
        let Some(title) = normalize_title(raw_title) else {
            tracing::debug!(target: "taskdeck.store", stage = "store.add.rejected", reason = "blank");
            return AddResult::Rejected;
        };

        {
            let mut state = self.inner.state.write().await;
            if state.adding {
                tracing::debug!(target: "taskdeck.store", stage = "store.add.rejected", reason = "in_flight");
                return AddResult::Rejected;
            }
            state.adding = true;
        }
        self.emit(StoreEvent::AddingChanged(true));

        let outcome = Outcome::from(self.inner.gateway.create_task(&title).await);
        let synced = outcome.is_remote();
        let result = self.commit_add(&title, outcome).await;

        if synced && self.inner.options.refresh_after_add {
            self.refresh().await;
        }
        result
    }

    async fn commit_add(&self, title: &str, outcome: Outcome<Task>) -> AddResult {
        let (task, local, notification) = match outcome {
            Outcome::Remote(task) => (task, false, Notification::task_added()),
            Outcome::Local(err) => {
                tracing::warn!(target: "taskdeck.store", stage = "store.add.local", error = %err);
                (Task::local(title), true, Notification::task_added_locally())
            }
        };

        {
            let mut state = self.inner.state.write().await;
            if let Some(pos) = state.position(&task.id) {
                tracing::warn!(target: "taskdeck.store", stage = "store.add.duplicate", id = %task.id);
                state.tasks.remove(pos);
            }
            state.tasks.insert(0, task.clone());
            state.adding = false;
        }

        self.inner.notifier.notify(notification);
        self.emit(StoreEvent::Added {
            id: task.id.clone(),
            local,
        });
        self.emit(StoreEvent::AddingChanged(false));
        if local {
            AddResult::Local(task)
        } else {
            AddResult::Synced(task)
        }
    }

    /// Set `completed` on one task. The local value follows the request even
    /// when the service call fails.
    pub async fn toggle(&self, id: &str, completed: bool) -> MutationResult {
        if !self.begin_busy(id, BusyOp::Toggling).await {
            return MutationResult::Skipped;
        }

        let outcome = Outcome::from(
            self.inner
                .gateway
                .update_task(id, TaskPatch::completed(completed))
                .await,
        );
        self.commit_toggle(id, completed, outcome).await
    }

    async fn commit_toggle(
        &self,
        id: &str,
        completed: bool,
        outcome: Outcome<TaskUpdate>,
    ) -> MutationResult {
        let result = match outcome {
            Outcome::Remote(remote) => {
                if remote.completed != completed {
                    tracing::debug!(
                        target: "taskdeck.store",
                        stage = "store.toggle.mismatch",
                        id = %id,
                        requested = completed,
                        remote = remote.completed
                    );
                }
                MutationResult::Synced
            }
            Outcome::Local(err) => {
                tracing::warn!(target: "taskdeck.store", stage = "store.toggle.local", id = %id, error = %err);
                MutationResult::Local
            }
        };

        {
            let mut state = self.inner.state.write().await;
            if let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) {
                task.completed = completed;
            }
            state.busy.remove(id);
        }

        self.emit(StoreEvent::Updated { id: id.to_string() });
        self.emit(StoreEvent::BusyChanged {
            id: id.to_string(),
            op: None,
        });
        result
    }

    /// Remove one task. It leaves the local collection even when the service
    /// call fails.
    pub async fn delete(&self, id: &str) -> MutationResult {
        if !self.begin_busy(id, BusyOp::Deleting).await {
            return MutationResult::Skipped;
        }

        let outcome = Outcome::from(self.inner.gateway.delete_task(id).await);
        self.commit_delete(id, outcome).await
    }

    async fn commit_delete(&self, id: &str, outcome: Outcome<()>) -> MutationResult {
        let (result, notification) = match outcome {
            Outcome::Remote(()) => (MutationResult::Synced, Notification::task_deleted()),
            Outcome::Local(err) => {
                tracing::warn!(target: "taskdeck.store", stage = "store.delete.local", id = %id, error = %err);
                (MutationResult::Local, Notification::task_deleted_locally())
            }
        };

        {
            let mut state = self.inner.state.write().await;
            if let Some(pos) = state.position(id) {
                state.tasks.remove(pos);
            }
            state.busy.remove(id);
        }

        self.inner.notifier.notify(notification);
        self.emit(StoreEvent::Removed { id: id.to_string() });
        self.emit(StoreEvent::BusyChanged {
            id: id.to_string(),
            op: None,
        });
        result
    }

    /// Idle -> Busy(op). Fails for unknown ids and ids that are already busy.
    async fn begin_busy(&self, id: &str, op: BusyOp) -> bool {
        {
            let mut state = self.inner.state.write().await;
            if state.position(id).is_none() {
                tracing::debug!(target: "taskdeck.store", stage = "store.busy.skip", id = %id, reason = "unknown");
                return false;
            }
            if let Some(current) = state.busy.get(id) {
                tracing::debug!(
                    target: "taskdeck.store",
                    stage = "store.busy.skip",
                    id = %id,
                    reason = "busy",
                    current = current.as_str()
                );
                return false;
            }
            state.busy.insert(id.to_string(), op);
        }
        self.emit(StoreEvent::BusyChanged {
            id: id.to_string(),
            op: Some(op),
        });
        true
    }
}

fn dedup_by_id(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::with_capacity(tasks.len());
    tasks
        .into_iter()
        .filter(|t| {
            let fresh = seen.insert(t.id.clone());
            if !fresh {
                tracing::warn!(target: "taskdeck.store", stage = "store.refresh.duplicate", id = %t.id);
            }
            fresh
        })
        .collect()
}

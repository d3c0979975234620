use std::fmt::Write as _;
use std::sync::Arc;

use taskdeck_core::api::{
    normalize_title, partition, AddResult, AppConfig, CliError, MutationResult, Notification,
    RecordingNotifier, Task, TaskStore, TaskSummary,
};

use super::cli::{Commands, ToggleArgs};
use crate::app;

/// Runs one command against a fresh session: load the list, apply the
/// change, report.
pub struct OneShot {
    store: TaskStore,
    notes: Arc<RecordingNotifier>,
}

pub struct OneShotOutput {
    pub stdout: String,
    pub notifications: Vec<Notification>,
}

impl OneShot {
    pub fn new(cfg: &AppConfig) -> Result<Self, CliError> {
        let notes = Arc::new(RecordingNotifier::new());
        let store = app::build_store(cfg, notes.clone())?;
        Ok(Self { store, notes })
    }

    pub async fn run(&self, cmd: Commands) -> Result<OneShotOutput, CliError> {
        self.store.refresh().await;

        match cmd {
            Commands::List | Commands::Tui => {}
            Commands::Add(args) => self.add(&args.title.join(" ")).await?,
            Commands::Toggle(args) => self.toggle(&args).await?,
            Commands::Delete(args) => self.delete(&args.id).await?,
        }

        Ok(OneShotOutput {
            stdout: render_list(&self.store.tasks().await),
            notifications: self.notes.take(),
        })
    }

    async fn add(&self, title: &str) -> Result<(), CliError> {
        if normalize_title(title).is_none() {
            return Err(CliError::Command("task title must not be empty".to_string()));
        }
        match self.store.add(title).await {
            AddResult::Rejected => Err(CliError::Command("task was not added".to_string())),
            AddResult::Synced(_) | AddResult::Local(_) => Ok(()),
        }
    }

    async fn toggle(&self, args: &ToggleArgs) -> Result<(), CliError> {
        let current = self
            .store
            .snapshot()
            .await
            .get(&args.id)
            .map(|t| t.completed)
            .ok_or_else(|| not_found(&args.id))?;
        let completed = args.target().unwrap_or(!current);
        match self.store.toggle(&args.id, completed).await {
            MutationResult::Skipped => Err(not_found(&args.id)),
            MutationResult::Synced | MutationResult::Local => Ok(()),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), CliError> {
        match self.store.delete(id).await {
            MutationResult::Skipped => Err(not_found(id)),
            MutationResult::Synced | MutationResult::Local => Ok(()),
        }
    }
}

fn not_found(id: &str) -> CliError {
    CliError::Command(format!("no task with id {id}"))
}

pub fn render_list(tasks: &[Task]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TaskSummary::of(tasks).summary_line());

    let (pending, completed) = partition(tasks);
    for task in pending {
        let _ = writeln!(out, "[ ] {}  ({})", task.title, task.id);
    }
    if !completed.is_empty() {
        let _ = writeln!(out, "Completed ({})", completed.len());
        for task in completed {
            let _ = writeln!(out, "[x] {}  ({})", task.title, task.id);
        }
    }
    out
}

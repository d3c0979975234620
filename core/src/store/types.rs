use std::collections::BTreeMap;

use crate::task::Task;

/// Mutation currently in flight for a task id. Its controls are disabled
/// until the mutation resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusyOp {
    Toggling,
    Deleting,
}

impl BusyOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BusyOp::Toggling => "toggling",
            BusyOp::Deleting => "deleting",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    /// Newest additions first; otherwise service order.
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub adding: bool,
    pub busy: BTreeMap<String, BusyOp>,
}

impl StoreState {
    pub fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Loading,
    Replaced { count: usize },
    AddingChanged(bool),
    Added { id: String, local: bool },
    Updated { id: String },
    Removed { id: String },
    BusyChanged { id: String, op: Option<BusyOp> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshResult {
    Loaded(usize),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddResult {
    /// Blank title, or another add still in flight. Nothing changed.
    Rejected,
    Synced(Task),
    Local(Task),
}

impl AddResult {
    pub fn task(&self) -> Option<&Task> {
        match self {
            AddResult::Rejected => None,
            AddResult::Synced(t) | AddResult::Local(t) => Some(t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationResult {
    /// Unknown id, or the id was already busy. No gateway call was made.
    Skipped,
    Synced,
    Local,
}

//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `taskdeck_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, ApiConfig, AppConfig, LoggingConfig, StoreOptions, TuiConfig,
};
pub use crate::error::{CliError, TransportError, TransportErrorKind};
pub use crate::gateway::{GatewayResult, TaskGateway};
pub use crate::notify::{
    ChannelNotifier, Notification, NotificationKind, Notifier, NullNotifier, RecordingNotifier,
    TracingNotifier,
};
pub use crate::store::{
    AddResult, BusyOp, MutationResult, Outcome, RefreshResult, StoreEvent, StoreState, TaskStore,
};
pub use crate::task::{
    normalize_title, partition, CreateTaskPayload, CreateTaskResponse, Task, TaskPatch,
    TaskSummary, TaskUpdate, UpdateTaskResponse, WireTask,
};

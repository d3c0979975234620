//! # Session task store
//!
//! Owns the in-memory task collection for one session and applies the same
//! policy to every mutation: call the gateway, then commit locally whether
//! the call succeeded or not. Outcomes are reported through a
//! [`Notifier`](crate::notify::Notifier) and a broadcast of [`StoreEvent`]s.

pub mod manager;
pub mod outcome;
pub mod types;

pub use manager::TaskStore;
pub use outcome::Outcome;
pub use types::{AddResult, BusyOp, MutationResult, RefreshResult, StoreEvent, StoreState};

use std::sync::Mutex;

use tokio::sync::mpsc;

use super::{Notification, NotificationKind, Notifier};

/// Forwards notifications to a receiver, typically the TUI event loop.
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        // Receiver gone means the UI is shutting down.
        let _ = self.tx.send(notification);
    }
}

pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.kind {
            NotificationKind::Success => {
                tracing::info!(target: "taskdeck.notify", kind = n.kind.as_str(), "{}", n)
            }
            NotificationKind::Demo | NotificationKind::Error => {
                tracing::warn!(target: "taskdeck.notify", kind = n.kind.as_str(), "{}", n)
            }
        }
    }
}

/// Keeps every notification in memory.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}

pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: Notification) {}
}

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

/// Reads terminal key presses on a blocking thread and forwards them to the
/// async event loop.
pub struct InputReader {
    running: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl InputReader {
    pub fn start() -> (Self, mpsc::UnboundedReceiver<KeyEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let running = Arc::new(AtomicBool::new(true));
        let thread_running = Arc::clone(&running);
        let handle = std::thread::spawn(move || {
            while thread_running.load(Ordering::SeqCst) {
                if !event::poll(Duration::from_millis(100)).unwrap_or(false) {
                    continue;
                }
                match event::read() {
                    // Only presses; Windows also reports releases.
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        tracing::trace!("Key pressed: {:?}", key);
                        if tx.send(key).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::debug!("terminal read failed: {e}");
                        break;
                    }
                }
            }
        });
        (
            Self {
                running,
                handle: Some(handle),
            },
            rx,
        )
    }

    pub fn stop(mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

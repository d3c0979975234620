mod app;
mod events;
mod terminal;
mod ui;

use std::io;
use std::time::Duration;

use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use taskdeck_core::api::{CliError, Notification, TaskStore, TuiConfig};
use tokio::sync::{broadcast, mpsc};

use app::{Action, TuiApp};

/// Run the interactive task list until the user quits.
pub async fn run_tui(
    store: TaskStore,
    notifications: mpsc::UnboundedReceiver<Notification>,
    cfg: TuiConfig,
    service: String,
) -> Result<(), CliError> {
    terminal::check_tui_support().map_err(CliError::Terminal)?;
    let mut app = TuiApp::new(cfg, service);
    let mut term = terminal::setup_terminal().map_err(CliError::Terminal)?;
    let result = run_on_terminal(&mut term, &mut app, store, notifications).await;
    terminal::restore_terminal(&mut term);
    result
}

async fn run_on_terminal(
    term: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
    store: TaskStore,
    mut notifications: mpsc::UnboundedReceiver<Notification>,
) -> Result<(), CliError> {
    let (input_reader, mut input_rx) = events::InputReader::start();
    let mut store_rx = store.subscribe();
    let mut tick = tokio::time::interval(Duration::from_millis(app.config.tick_ms.max(16)));

    dispatch(&store, Action::Refresh);

    let mut exit_requested = false;
    loop {
        tokio::select! {
            Some(key) = input_rx.recv() => {
                match app.handle_key(key) {
                    Action::Quit => exit_requested = true,
                    action => dispatch(&store, action),
                }
            }
            Some(n) = notifications.recv() => {
                app.push_notification(n);
            }
            event = store_rx.recv() => {
                match event {
                    Ok(event) => {
                        tracing::trace!(target: "taskdeck.tui", ?event);
                        app.on_store_event(&event);
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::debug!(target: "taskdeck.tui", skipped = n, "store events lagged");
                        app.on_events_lagged();
                    }
                    Err(broadcast::error::RecvError::Closed) => {}
                }
            }
            _ = tick.tick() => {}
        }

        app.set_view(store.snapshot().await);
        app.expire_toast();
        if exit_requested {
            break;
        }
        if let Err(e) = term.draw(|f| ui::draw(f, app)) {
            input_reader.stop();
            return Err(CliError::Terminal(e.to_string()));
        }
    }

    input_reader.stop();
    Ok(())
}

/// Run a store operation in the background so the loop keeps drawing.
fn dispatch(store: &TaskStore, action: Action) {
    let store = store.clone();
    match action {
        Action::None | Action::Quit => {}
        Action::Refresh => {
            tokio::spawn(async move {
                store.refresh().await;
            });
        }
        Action::Add(title) => {
            tokio::spawn(async move {
                store.add(&title).await;
            });
        }
        Action::Toggle { id, completed } => {
            tokio::spawn(async move {
                store.toggle(&id, completed).await;
            });
        }
        Action::Delete(id) => {
            tokio::spawn(async move {
                store.delete(&id).await;
            });
        }
    }
}

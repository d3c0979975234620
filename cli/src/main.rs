use clap::Parser;
mod app;
mod commands;
mod tui;
use commands::cli;
use commands::tasks::OneShot;
use taskdeck_core::api::{ChannelNotifier, CliError, LoggingConfig};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let mut args = cli::Args::parse();
    let cfg = app::resolve_config(&args)?;
    let cmd = args.command.take().unwrap_or(cli::Commands::Tui);

    // The TUI owns the terminal; console logging would tear the screen.
    let interactive = matches!(cmd, cli::Commands::Tui);
    init_tracing(&cfg.logging, !interactive).map_err(CliError::Command)?;

    if interactive {
        let (notifier, notifications) = ChannelNotifier::new();
        let store = app::build_store(&cfg, Arc::new(notifier))?;
        tui::run_tui(store, notifications, cfg.tui.clone(), app::service_label(&cfg)).await?;
        return Ok(0);
    }

    let shot = OneShot::new(&cfg)?;
    let out = shot.run(cmd).await?;
    for n in &out.notifications {
        eprintln!("{n}");
    }
    print!("{}", out.stdout);
    Ok(0)
}

fn init_tracing(logging: &LoggingConfig, allow_console: bool) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("taskdeck"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("taskdeck.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    let console = logging.console && allow_console;
    if !console && maybe_writer.is_none() {
        // Nothing to write to (e.g. TUI mode without a log file).
        return Ok(());
    }

    let console_layer = console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

use std::sync::Arc;

use taskdeck_core::api::{AppConfig, CliError, Notifier, TaskStore};

use crate::commands::cli::Args;

/// Resolve the effective configuration: file, then environment, then flags.
pub fn resolve_config(args: &Args) -> Result<AppConfig, CliError> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => taskdeck_core::config::load_from_path(path),
        None => taskdeck_core::config::load_default(),
    }
    .map_err(|e| CliError::Config(e.to_string()))?;

    if let Some(url) = args.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
        cfg.api.base_url = url.to_string();
    }
    if args.offline {
        cfg.api.offline = true;
    }
    Ok(cfg)
}

pub fn build_store(cfg: &AppConfig, notifier: Arc<dyn Notifier>) -> Result<TaskStore, CliError> {
    let gateway = taskdeck_plugins::factory::build_gateway(cfg)
        .map_err(|e| CliError::Config(format!("task service: {e}")))?;
    tracing::debug!(gateway = gateway.name(), "task store ready");
    Ok(TaskStore::new(gateway, notifier, cfg.store.clone()))
}

/// Short label for the UI header.
pub fn service_label(cfg: &AppConfig) -> String {
    if cfg.api.offline {
        "offline".to_string()
    } else {
        cfg.api.base_url.trim_end_matches('/').to_string()
    }
}

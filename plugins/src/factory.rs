use std::sync::Arc;

use anyhow::Result;
use taskdeck_core::api::{AppConfig, TaskGateway};

use crate::gateway::{HttpTaskGateway, OfflineGateway};

pub fn build_gateway(cfg: &AppConfig) -> Result<Arc<dyn TaskGateway>> {
    if cfg.api.offline {
        tracing::info!(target: "taskdeck.gateway", "offline mode: changes stay local");
        return Ok(Arc::new(OfflineGateway));
    }

    tracing::debug!(
        target: "taskdeck.gateway",
        base_url = %cfg.api.base_url,
        timeout_ms = cfg.api.timeout_ms
    );
    Ok(Arc::new(HttpTaskGateway::new(
        &cfg.api.base_url,
        cfg.api.api_key.clone(),
        cfg.api.timeout_ms,
    )?))
}

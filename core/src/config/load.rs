use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default taskdeck data directory: ~/.taskdeck
pub fn get_taskdeck_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".taskdeck"))
}

pub fn load_from_str(s: &str) -> anyhow::Result<AppConfig> {
    Ok(toml::from_str::<AppConfig>(s)?)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    load_from_str(&s)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.taskdeck/config.toml
    let user_config = get_taskdeck_data_dir()?.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

/// Environment overrides win over file values; empty values are ignored.
fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("TASKDECK_API_URL") {
        cfg.api.base_url = v;
    }
    if let Some(v) = non_empty("TASKDECK_API_KEY") {
        cfg.api.api_key = v;
    }
    if let Some(v) = non_empty("TASKDECK_OFFLINE") {
        cfg.api.offline = matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true");
    }
}

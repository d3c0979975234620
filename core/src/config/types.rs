use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub store: StoreOptions,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the task service, e.g. "https://example.com/Stage".
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent as a bearer token when non-empty.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Skip the network entirely; every mutation is applied locally.
    #[serde(default)]
    pub offline: bool,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_ms: default_timeout_ms(),
            offline: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Re-list from the service after a successful remote add.
    #[serde(default)]
    pub refresh_after_add: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "taskdeck_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// How long a notification stays on screen.
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
}

fn default_tick_ms() -> u64 {
    250
}

fn default_toast_ms() -> u64 {
    3_000
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            toast_ms: default_toast_ms(),
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl CliError {
    // 0: success
    // 11: config error
    // 20: terminal / IO / command error
    // 50: internal/uncategorized
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 11,
            CliError::Command(_) | CliError::Terminal(_) | CliError::Io(_) => 20,
            CliError::Anyhow(_) => 50,
        }
    }
}

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about = "A short task list kept in sync with a task service")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the task service (overrides config and TASKDECK_API_URL).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Never contact the service; changes are kept for this session only.
    #[arg(long, global = true)]
    pub offline: bool,

    /// Read configuration from this file instead of the default locations.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AddArgs {
    /// Task title; multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ToggleArgs {
    pub id: String,

    /// Mark the task as completed.
    #[arg(long, conflicts_with = "undone")]
    pub done: bool,

    /// Mark the task as not completed.
    #[arg(long)]
    pub undone: bool,
}

impl ToggleArgs {
    /// Requested completion state, or `None` to flip the current one.
    pub fn target(&self) -> Option<bool> {
        match (self.done, self.undone) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the task list.
    List,
    /// Add a task.
    Add(AddArgs),
    /// Mark a task as completed or not.
    Toggle(ToggleArgs),
    /// Delete a task.
    Delete(DeleteArgs),
    /// Interactive terminal UI (default).
    Tui,
}

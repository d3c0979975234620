use super::model::Task;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskSummary {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }

    pub fn summary_line(&self) -> String {
        if self.total == 0 {
            "Start adding tasks to stay organized".to_string()
        } else {
            format!("{} of {} tasks completed", self.completed, self.total)
        }
    }
}

/// Pending tasks first, then completed ones, each keeping collection order.
pub fn partition(tasks: &[Task]) -> (Vec<&Task>, Vec<&Task>) {
    tasks.iter().partition(|t| !t.completed)
}

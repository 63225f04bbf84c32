//! Kanban column projection.

use crate::model::task::{Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// One board column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnView {
    pub status: TaskStatus,
    pub title: String,
    /// Tasks of this stage in board insertion order.
    pub tasks: Vec<Task>,
}

impl ColumnView {
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

/// Column heading shown for a workflow stage.
pub fn column_title(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "Backlog",
        TaskStatus::InProgress => "Active Execution",
        TaskStatus::Done => "Revenue Generated",
    }
}

/// Splits `tasks` into the three workflow columns, in workflow order.
pub fn columns(tasks: &[Task]) -> Vec<ColumnView> {
    TaskStatus::ALL
        .iter()
        .map(|&status| ColumnView {
            status,
            title: column_title(status).to_string(),
            tasks: tasks
                .iter()
                .filter(|task| task.status == status)
                .cloned()
                .collect(),
        })
        .collect()
}

//! Board task domain model.
//!
//! # Responsibility
//! - Define the tracked unit of work shown on the project board.
//! - Define the status and priority vocabularies.
//!
//! # Invariants
//! - `id` is unique within the owning board and never reused.
//! - `revenue` is finite and non-negative.
//! - Only `status` changes after creation (via board moves).

use crate::model::ids::TaskId;
use serde::{Deserialize, Deserializer, Serialize};

/// Workflow stage of a task.
///
/// Variants are declared in workflow order, so `Ord` follows the stage
/// sequence rather than any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Backlog, not started.
    Todo,
    /// Actively being executed.
    InProgress,
    /// Completed; its revenue counts as generated.
    Done,
}

impl TaskStatus {
    /// All stages in workflow order.
    pub const ALL: [TaskStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Stable wire label (`todo|in-progress|done`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Next workflow stage, or `None` for `Done`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Todo => Some(Self::InProgress),
            Self::InProgress => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Previous workflow stage, or `None` for `Todo`.
    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Todo => None,
            Self::InProgress => Some(Self::Todo),
            Self::Done => Some(Self::InProgress),
        }
    }
}

/// Task urgency label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One project card on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Display labels; order matters for rendering only.
    pub tags: Vec<String>,
    #[serde(deserialize_with = "deserialize_revenue")]
    pub revenue: f64,
}

impl Task {
    /// Creates a task with explicit fields.
    ///
    /// Non-finite or negative revenue is stored as `0.0`.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        status: TaskStatus,
        priority: TaskPriority,
        tags: Vec<String>,
        revenue: f64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            status,
            priority,
            tags,
            revenue: sanitize_revenue(revenue),
        }
    }

    /// Returns a copy of this task in another workflow stage.
    pub fn with_status(&self, status: TaskStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

pub(crate) fn sanitize_revenue(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn deserialize_revenue<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(sanitize_revenue)
}

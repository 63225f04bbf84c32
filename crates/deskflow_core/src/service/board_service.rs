//! Project board use-case service.
//!
//! # Responsibility
//! - Own the ordered task collection of one board.
//! - Provide create/delete/move operations and status-filtered views.
//!
//! # Invariants
//! - Task ids are unique within the board.
//! - New tasks are appended to the end of the whole collection, whatever
//!   their status.
//! - Every effective mutation installs a new immutable snapshot and bumps
//!   `revision`; no-ops leave both untouched.
//! - Blank titles and unknown ids are silently ignored.

use crate::model::ids::{retain_first_by_id, IdGenerator, RandomIdGenerator, TaskId};
use crate::model::task::{sanitize_revenue, Task, TaskPriority, TaskStatus};
use crate::projection::dashboard::{aggregate, dashboard, BoardAggregate, DashboardView};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Tag attached to every task created from the board.
pub const NEW_TASK_TAG: &str = "New";

static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("valid leading number regex")
});

/// Immutable view of the board at one revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Monotonic counter of effective mutations.
    pub revision: u64,
    /// Tasks in insertion order.
    pub tasks: Arc<[Task]>,
}

impl BoardSnapshot {
    /// Tasks in one workflow stage, insertion order preserved.
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.status == status)
            .cloned()
            .collect()
    }

    pub fn aggregate(&self) -> BoardAggregate {
        aggregate(&self.tasks)
    }

    pub fn dashboard(&self) -> DashboardView {
        dashboard(&self.tasks)
    }
}

/// Board shared across threads behind one coarse lock.
pub type SharedBoard = Arc<Mutex<BoardService>>;

/// Board engine: single owner of the task sequence.
pub struct BoardService {
    tasks: Arc<[Task]>,
    revision: u64,
    ids: Box<dyn IdGenerator>,
}

impl BoardService {
    /// Creates a board seeded with `tasks` and random id generation.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self::with_id_generator(tasks, Box::new(RandomIdGenerator))
    }

    /// Creates a board with a caller-provided id generator.
    ///
    /// Tasks repeating an earlier id are dropped.
    pub fn with_id_generator(tasks: Vec<Task>, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            tasks: retain_first_by_id(tasks, "board", |task| &task.id).into(),
            revision: 0,
            ids,
        }
    }

    /// Wraps this board for multi-threaded hosts.
    pub fn into_shared(self) -> SharedBoard {
        Arc::new(Mutex::new(self))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            revision: self.revision,
            tasks: Arc::clone(&self.tasks),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Creates a task in `status` and appends it to the board.
    ///
    /// Returns `None` without touching state when `title` is blank.
    /// `revenue_text` is parsed leniently; unparsable input yields `0`.
    pub fn create_task(
        &mut self,
        status: TaskStatus,
        title: &str,
        revenue_text: &str,
    ) -> Option<Task> {
        let title = title.trim();
        if title.is_empty() {
            debug!("event=task_create module=board status=skipped reason=blank_title");
            return None;
        }

        let task = Task::new(
            self.fresh_id(),
            title,
            status,
            TaskPriority::Medium,
            vec![NEW_TASK_TAG.to_string()],
            parse_revenue(revenue_text),
        );

        let mut next = self.tasks.to_vec();
        next.push(task.clone());
        self.install(next);
        debug!(
            "event=task_create module=board status=ok task_id={} task_status={} revision={}",
            task.id,
            status.as_str(),
            self.revision
        );
        Some(task)
    }

    /// Removes the task with `id`; unknown ids are ignored.
    pub fn delete_task(&mut self, id: &TaskId) -> BoardSnapshot {
        if self.get(id).is_none() {
            debug!("event=task_delete module=board status=skipped reason=unknown_id task_id={id}");
            return self.snapshot();
        }

        let next = self
            .tasks
            .iter()
            .filter(|task| &task.id != id)
            .cloned()
            .collect();
        self.install(next);
        debug!(
            "event=task_delete module=board status=ok task_id={id} revision={}",
            self.revision
        );
        self.snapshot()
    }

    /// Sets the status of the task with `id`, keeping its position and every
    /// other field; unknown ids are ignored.
    pub fn move_task(&mut self, id: &TaskId, status: TaskStatus) -> BoardSnapshot {
        if self.get(id).is_none() {
            debug!("event=task_move module=board status=skipped reason=unknown_id task_id={id}");
            return self.snapshot();
        }

        let next = self
            .tasks
            .iter()
            .map(|task| {
                if &task.id == id {
                    task.with_status(status)
                } else {
                    task.clone()
                }
            })
            .collect();
        self.install(next);
        debug!(
            "event=task_move module=board status=ok task_id={id} task_status={} revision={}",
            status.as_str(),
            self.revision
        );
        self.snapshot()
    }

    /// Moves the task one stage forward; no-op when already done.
    pub fn advance_task(&mut self, id: &TaskId) -> BoardSnapshot {
        self.step_task(id, "task_advance", TaskStatus::next)
    }

    /// Moves the task one stage back; no-op when still in the backlog.
    pub fn retreat_task(&mut self, id: &TaskId) -> BoardSnapshot {
        self.step_task(id, "task_retreat", TaskStatus::previous)
    }

    /// Tasks in one workflow stage, insertion order preserved.
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.snapshot().tasks_by_status(status)
    }

    pub fn aggregate(&self) -> BoardAggregate {
        aggregate(&self.tasks)
    }

    fn step_task(
        &mut self,
        id: &TaskId,
        event: &str,
        step: fn(TaskStatus) -> Option<TaskStatus>,
    ) -> BoardSnapshot {
        let Some(task) = self.get(id) else {
            debug!("event={event} module=board status=skipped reason=unknown_id task_id={id}");
            return self.snapshot();
        };
        match step(task.status) {
            Some(status) => self.move_task(id, status),
            None => {
                debug!(
                    "event={event} module=board status=skipped reason=workflow_end task_id={id} task_status={}",
                    task.status.as_str()
                );
                self.snapshot()
            }
        }
    }

    fn install(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks.into();
        self.revision += 1;
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::new(self.ids.next_id());
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

/// Parses user revenue input the lenient way a number field does: the
/// longest leading numeric prefix counts, anything else yields `0`.
///
/// Negative and non-finite results also collapse to `0`.
pub fn parse_revenue(text: &str) -> f64 {
    LEADING_NUMBER_RE
        .find(text.trim_start())
        .and_then(|found| found.as_str().parse::<f64>().ok())
        .map(sanitize_revenue)
        .unwrap_or(0.0)
}

//! Dashboard projections over a board snapshot.
//!
//! # Responsibility
//! - Derive KPI aggregates, initiative rows and the financial summary.
//!
//! # Invariants
//! - Pure: inputs are borrowed read-only and never changed.
//! - Total: an empty task list yields all-zero aggregates.
//! - `completion_rate_percent` is always within `0..=100`.

use crate::model::block::{ProjectItem, ProjectStatus};
use crate::model::ids::TaskId;
use crate::model::task::{Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Headline board metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardAggregate {
    pub total_count: usize,
    pub done_count: usize,
    /// `round(done / total * 100)`, or `0` for an empty board.
    pub completion_rate_percent: u32,
    /// Sum of every task's revenue regardless of status.
    pub total_revenue: f64,
}

/// One line of the financial summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialLine {
    pub task_id: TaskId,
    pub name: String,
    pub revenue: f64,
}

/// Per-task revenue lines with their running total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub lines: Vec<FinancialLine>,
    pub total_forecast: f64,
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub kpis: BoardAggregate,
    pub initiatives: Vec<ProjectItem>,
    pub finance: FinancialSummary,
}

/// Computes the headline metrics of `tasks`.
pub fn aggregate(tasks: &[Task]) -> BoardAggregate {
    let total_count = tasks.len();
    let done_count = tasks.iter().filter(|task| task.is_done()).count();
    let completion_rate_percent = if total_count > 0 {
        (done_count as f64 / total_count as f64 * 100.0).round() as u32
    } else {
        0
    };

    BoardAggregate {
        total_count,
        done_count,
        completion_rate_percent,
        total_revenue: total_revenue(tasks),
    }
}

pub fn total_revenue(tasks: &[Task]) -> f64 {
    tasks.iter().map(|task| task.revenue).sum()
}

/// Maps a board stage onto the tracker's health label.
pub fn project_status(status: TaskStatus) -> ProjectStatus {
    match status {
        TaskStatus::Done => ProjectStatus::Done,
        TaskStatus::InProgress => ProjectStatus::Active,
        TaskStatus::Todo => ProjectStatus::Blocked,
    }
}

/// Projects one task into a tracker row; the first tag is the next action.
pub fn project_item(task: &Task) -> ProjectItem {
    ProjectItem {
        id: task.id.to_string(),
        name: task.title.clone(),
        status: project_status(task.status),
        next_action: task.tags.first().cloned().unwrap_or_default(),
        revenue: Some(task.revenue),
    }
}

pub fn financial_summary(tasks: &[Task]) -> FinancialSummary {
    FinancialSummary {
        lines: tasks
            .iter()
            .map(|task| FinancialLine {
                task_id: task.id.clone(),
                name: task.title.clone(),
                revenue: task.revenue,
            })
            .collect(),
        total_forecast: total_revenue(tasks),
    }
}

/// Builds the whole dashboard view for `tasks`.
pub fn dashboard(tasks: &[Task]) -> DashboardView {
    DashboardView {
        kpis: aggregate(tasks),
        initiatives: tasks.iter().map(project_item).collect(),
        finance: financial_summary(tasks),
    }
}

/// Formats an amount as dollars with thousands separators, e.g. `$2,500`
/// or `$1,234.5`. At most three fraction digits are kept.
pub fn format_currency(amount: f64) -> String {
    let rounded = (amount * 1000.0).round() / 1000.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let fixed = format!("{:.3}", rounded.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if fraction.is_empty() {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::format_currency;

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(950.0), "$950");
        assert_eq!(format_currency(2500.0), "$2,500");
        assert_eq!(format_currency(10500.0), "$10,500");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
    }

    #[test]
    fn format_currency_trims_fraction_zeros() {
        assert_eq!(format_currency(1234.5), "$1,234.5");
        assert_eq!(format_currency(12.3456), "$12.346");
    }
}

//! Demo workspace content.
//!
//! Factories build fresh values on every call; nothing here is shared or
//! mutable. Callers thread the result into the engines at startup.

use crate::model::block::{Block, BlockContent, ProjectItem, ProjectStatus, TodoItem};
use crate::model::ids::{BlockId, PageId, TaskId};
use crate::model::page::Page;
use crate::model::task::{Task, TaskPriority, TaskStatus};

/// The four demo projects of the board, in board order.
pub fn initial_tasks() -> Vec<Task> {
    vec![
        seed_task(
            "1",
            "BADAGUESTHOUSE SEO Package",
            TaskStatus::Todo,
            TaskPriority::High,
            "Growth",
            2500.0,
        ),
        seed_task(
            "2",
            "YECARS Sales Bot Integration",
            TaskStatus::InProgress,
            TaskPriority::Medium,
            "Automation",
            5000.0,
        ),
        seed_task(
            "3",
            "IFC Portfolio Review",
            TaskStatus::Done,
            TaskPriority::High,
            "Finance",
            1200.0,
        ),
        seed_task(
            "4",
            "Automated Guest Messaging",
            TaskStatus::Todo,
            TaskPriority::Low,
            "Hospitality",
            1800.0,
        ),
    ]
}

/// The demo pages: a strategy document and an empty growth page.
pub fn initial_pages() -> Vec<Page> {
    let mut strategy = Page::new(
        PageId::new("p1"),
        "Business Strategy 2024",
        "🚀",
        vec![
            block("b1", BlockContent::Heading1("Omni-Strategy".to_string())),
            block(
                "b2",
                BlockContent::Text(
                    "The plan to dominate the hospitality and automotive automation market."
                        .to_string(),
                ),
            ),
            block(
                "b3",
                BlockContent::ProjectTracker(vec![
                    tracker_row("1", "BADAGUESTHOUSE", ProjectStatus::Active, "SEO Optimization"),
                    tracker_row(
                        "2",
                        "YECARS Sales Bot",
                        ProjectStatus::Blocked,
                        "Finish training dataset",
                    ),
                ]),
            ),
            block("b4", BlockContent::Heading2("Key Goals".to_string())),
            block(
                "b5",
                BlockContent::Todo(TodoItem::new("Automate guest check-ins", false)),
            ),
            block(
                "b6",
                BlockContent::Todo(TodoItem::new("IFC Finance Certification", true)),
            ),
        ],
    );
    strategy.is_favorite = Some(true);

    let growth = Page::new(PageId::new("p2"), "BADAGUESTHOUSE Growth", "🏠", Vec::new());

    vec![strategy, growth]
}

fn seed_task(
    id: &str,
    title: &str,
    status: TaskStatus,
    priority: TaskPriority,
    tag: &str,
    revenue: f64,
) -> Task {
    Task::new(
        TaskId::new(id),
        title,
        status,
        priority,
        vec![tag.to_string()],
        revenue,
    )
}

fn block(id: &str, content: BlockContent) -> Block {
    Block::new(BlockId::new(id), content)
}

fn tracker_row(id: &str, name: &str, status: ProjectStatus, next_action: &str) -> ProjectItem {
    ProjectItem {
        id: id.to_string(),
        name: name.to_string(),
        status,
        next_action: next_action.to_string(),
        revenue: None,
    }
}

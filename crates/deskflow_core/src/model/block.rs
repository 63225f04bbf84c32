//! Document block domain model.
//!
//! # Responsibility
//! - Define the typed content unit of a page.
//! - Tie each block type to exactly one payload shape.
//!
//! # Invariants
//! - A block's type is fixed at creation; content replacement must keep the
//!   same `BlockKind`.
//! - Serialized shape is `{ "id", "type", "content" }`, with `content`
//!   shaped by `type`.

use crate::model::ids::BlockId;
use serde::{Deserialize, Serialize};

/// Closed set of block types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "h1")]
    Heading1,
    #[serde(rename = "h2")]
    Heading2,
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "instagram")]
    Instagram,
    #[serde(rename = "project-tracker")]
    ProjectTracker,
    #[serde(rename = "finance-learning")]
    FinanceLearning,
    #[serde(rename = "automation-idea")]
    AutomationIdea,
}

impl BlockKind {
    pub const ALL: [BlockKind; 8] = [
        Self::Text,
        Self::Heading1,
        Self::Heading2,
        Self::Todo,
        Self::Instagram,
        Self::ProjectTracker,
        Self::FinanceLearning,
        Self::AutomationIdea,
    ];

    /// Stable wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Heading1 => "h1",
            Self::Heading2 => "h2",
            Self::Todo => "todo",
            Self::Instagram => "instagram",
            Self::ProjectTracker => "project-tracker",
            Self::FinanceLearning => "finance-learning",
            Self::AutomationIdea => "automation-idea",
        }
    }
}

/// Checkbox item payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub text: String,
    pub checked: bool,
}

impl TodoItem {
    pub fn new(text: impl Into<String>, checked: bool) -> Self {
        Self {
            text: text.into(),
            checked,
        }
    }
}

/// Health label for one tracked project row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Blocked,
    Done,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Blocked => "blocked",
            Self::Done => "done",
        }
    }
}

/// One row of a project-tracker block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    pub next_action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
}

/// Publication stage of a social post draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    Draft,
    Scheduled,
    Posted,
}

/// Instagram post draft rendered by the instagram block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstagramDraft {
    pub id: String,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub status: DraftStatus,
}

/// Finance concept card rendered by the finance-learning block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceConcept {
    pub id: String,
    pub name: String,
    pub explanation: String,
    pub example: String,
}

/// Automation idea card rendered by the automation-idea block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationIdea {
    pub problem: String,
    pub solution: String,
    /// Comma-separated technology list.
    pub tech: String,
}

impl AutomationIdea {
    /// Technology labels split on commas, trimmed, blanks dropped.
    pub fn tech_stack(&self) -> Vec<&str> {
        self.tech
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .collect()
    }
}

/// Payload of presentation-only blocks: a placeholder string until a
/// structured record is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RichPayload<T> {
    Placeholder(String),
    Record(T),
}

impl<T> RichPayload<T> {
    pub fn record(&self) -> Option<&T> {
        match self {
            Self::Record(value) => Some(value),
            Self::Placeholder(_) => None,
        }
    }
}

impl<T> Default for RichPayload<T> {
    fn default() -> Self {
        Self::Placeholder(String::new())
    }
}

/// Block payload, one variant per block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum BlockContent {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "h1")]
    Heading1(String),
    #[serde(rename = "h2")]
    Heading2(String),
    #[serde(rename = "todo")]
    Todo(TodoItem),
    #[serde(rename = "instagram")]
    Instagram(RichPayload<InstagramDraft>),
    #[serde(rename = "project-tracker")]
    ProjectTracker(Vec<ProjectItem>),
    #[serde(rename = "finance-learning")]
    FinanceLearning(RichPayload<FinanceConcept>),
    #[serde(rename = "automation-idea")]
    AutomationIdea(RichPayload<AutomationIdea>),
}

impl BlockContent {
    /// Initial payload for a freshly inserted block of `kind`.
    pub fn empty(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Text => Self::Text(String::new()),
            BlockKind::Heading1 => Self::Heading1(String::new()),
            BlockKind::Heading2 => Self::Heading2(String::new()),
            BlockKind::Todo => Self::Todo(TodoItem::default()),
            BlockKind::Instagram => Self::Instagram(RichPayload::default()),
            BlockKind::ProjectTracker => Self::ProjectTracker(Vec::new()),
            BlockKind::FinanceLearning => Self::FinanceLearning(RichPayload::default()),
            BlockKind::AutomationIdea => Self::AutomationIdea(RichPayload::default()),
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Text(_) => BlockKind::Text,
            Self::Heading1(_) => BlockKind::Heading1,
            Self::Heading2(_) => BlockKind::Heading2,
            Self::Todo(_) => BlockKind::Todo,
            Self::Instagram(_) => BlockKind::Instagram,
            Self::ProjectTracker(_) => BlockKind::ProjectTracker,
            Self::FinanceLearning(_) => BlockKind::FinanceLearning,
            Self::AutomationIdea(_) => BlockKind::AutomationIdea,
        }
    }

    /// Whether erasing on this payload should remove the whole block.
    ///
    /// Only empty `text` blocks and `todo` blocks with empty text qualify.
    pub fn is_erasable_when_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Todo(item) => item.text.is_empty(),
            _ => false,
        }
    }
}

/// One typed content unit of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    #[serde(flatten)]
    content: BlockContent,
}

impl Block {
    pub fn new(id: BlockId, content: BlockContent) -> Self {
        Self { id, content }
    }

    /// Creates a block of `kind` with its default payload.
    pub fn empty(id: BlockId, kind: BlockKind) -> Self {
        Self::new(id, BlockContent::empty(kind))
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    pub fn content(&self) -> &BlockContent {
        &self.content
    }

    /// Returns a copy carrying `content`, or `None` when the payload belongs
    /// to a different block type.
    pub fn with_content(&self, content: BlockContent) -> Option<Self> {
        if content.kind() != self.kind() {
            return None;
        }
        Some(Self {
            id: self.id.clone(),
            content,
        })
    }
}

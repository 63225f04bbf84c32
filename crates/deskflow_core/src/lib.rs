//! Core workspace content engine for Deskflow.
//! Owns the project board, the block documents and the AI generation
//! boundary; UI layers render its snapshots and push events back in.

pub mod assistant;
pub mod config;
pub mod logging;
pub mod model;
pub mod projection;
pub mod seed;
pub mod service;

pub use assistant::gemini::GeminiClient;
pub use assistant::state::{GenerationSlot, GenerationState, GenerationTicket};
pub use assistant::{AssistantError, AssistantReply, CaptionDraft, ContentGenerator};
pub use config::{AssistantConfig, LoggingConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingError};
pub use model::block::{
    AutomationIdea, Block, BlockContent, BlockKind, DraftStatus, FinanceConcept, InstagramDraft,
    ProjectItem, ProjectStatus, RichPayload, TodoItem,
};
pub use model::ids::{
    BlockId, IdGenerator, PageId, RandomIdGenerator, SequentialIdGenerator, TaskId,
};
pub use model::page::Page;
pub use model::task::{Task, TaskPriority, TaskStatus};
pub use projection::columns::{columns, ColumnView};
pub use projection::dashboard::{
    aggregate, dashboard, format_currency, BoardAggregate, DashboardView, FinancialLine,
    FinancialSummary,
};
pub use service::board_service::{parse_revenue, BoardService, BoardSnapshot, SharedBoard};
pub use service::editor_service::{
    EditorKey, EditorService, EditorUpdate, KeyOutcome, KeyPress, PageSnapshot, SharedEditor,
};
pub use service::workspace_service::WorkspaceService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

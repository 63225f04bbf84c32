//! Core use-case services.
//!
//! # Responsibility
//! - Own the mutable workspace state (board tasks, page blocks, page list).
//! - Expose every change as a whole-collection replacement so callers only
//!   ever observe complete snapshots.

pub mod board_service;
pub mod editor_service;
pub mod workspace_service;

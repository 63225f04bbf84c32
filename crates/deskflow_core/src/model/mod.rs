//! Domain model for the board and the block documents.
//!
//! # Responsibility
//! - Define the records owned by the board and editor engines.
//! - Keep payload shapes tied to their type tags at compile time.
//!
//! # Invariants
//! - Every record is identified by a typed, immutable id.
//! - Records are owned by exactly one board or page; no back-references.

pub mod block;
pub mod ids;
pub mod page;
pub mod task;

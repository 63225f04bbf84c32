//! Read-only views derived from board snapshots.
//!
//! Projections are recomputed from scratch for every snapshot and never
//! hold state of their own.

pub mod columns;
pub mod dashboard;

//! Workspace page model.
//!
//! # Invariants
//! - `blocks` order is the document's visual order.
//! - Block ids are unique within one page.
//! - `blocks` is only ever replaced as a whole; individual blocks are not
//!   mutated in place.

use crate::model::block::Block;
use crate::model::ids::PageId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One titled document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub title: String,
    /// Display glyph; carried through, never interpreted.
    pub icon: String,
    pub blocks: Arc<[Block]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl Page {
    pub fn new(
        id: PageId,
        title: impl Into<String>,
        icon: impl Into<String>,
        blocks: Vec<Block>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            icon: icon.into(),
            blocks: blocks.into(),
            is_favorite: None,
        }
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite.unwrap_or(false)
    }

    /// Returns whether every block id on this page is distinct.
    pub fn has_unique_block_ids(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.blocks.len());
        self.blocks.iter().all(|block| seen.insert(block.id()))
    }
}

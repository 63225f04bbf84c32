//! Workspace page list use-case service.
//!
//! # Responsibility
//! - Own the ordered list of document pages.
//! - Create pages and write editor results back by page id.
//!
//! # Invariants
//! - Page ids are unique; page order is creation order.
//! - The list is replaced as a whole on every effective change.
//! - Unknown page ids are silently ignored.

use crate::model::block::{Block, BlockKind};
use crate::model::ids::{
    retain_first_by_id, BlockId, IdGenerator, PageId, RandomIdGenerator,
};
use crate::model::page::Page;
use crate::service::editor_service::EditorService;
use log::debug;
use std::sync::Arc;

/// Title given to pages created from the workspace.
pub const NEW_PAGE_TITLE: &str = "New Page";
/// Icon given to pages created from the workspace.
pub const NEW_PAGE_ICON: &str = "📄";
const NEW_PAGE_FIRST_BLOCK_ID: &str = "b1";

/// Page list engine.
pub struct WorkspaceService {
    pages: Arc<[Page]>,
    ids: Box<dyn IdGenerator>,
}

impl WorkspaceService {
    pub fn new(pages: Vec<Page>) -> Self {
        Self::with_id_generator(pages, Box::new(RandomIdGenerator))
    }

    /// Pages repeating an earlier id are dropped.
    pub fn with_id_generator(pages: Vec<Page>, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            pages: retain_first_by_id(pages, "workspace", |page| &page.id).into(),
            ids,
        }
    }

    /// Pages in creation order.
    pub fn pages(&self) -> Arc<[Page]> {
        Arc::clone(&self.pages)
    }

    pub fn page(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|page| &page.id == id)
    }

    pub fn favorites(&self) -> Vec<&Page> {
        self.pages.iter().filter(|page| page.is_favorite()).collect()
    }

    /// Appends a fresh page holding one empty text block.
    pub fn create_page(&mut self) -> Page {
        let id = self.fresh_id();
        let page = Page::new(
            id,
            NEW_PAGE_TITLE,
            NEW_PAGE_ICON,
            vec![Block::empty(
                BlockId::new(NEW_PAGE_FIRST_BLOCK_ID),
                BlockKind::Text,
            )],
        );

        let mut next = self.pages.to_vec();
        next.push(page.clone());
        self.pages = next.into();
        debug!(
            "event=page_create module=workspace status=ok page_id={} page_count={}",
            page.id,
            self.pages.len()
        );
        page
    }

    /// Opens an editor over a copy of page `id`.
    pub fn edit(&self, id: &PageId) -> Option<EditorService> {
        self.page(id).cloned().map(EditorService::open)
    }

    /// Installs `blocks` as the new content of page `id`.
    pub fn replace_blocks(&mut self, id: &PageId, blocks: Arc<[Block]>) -> bool {
        self.update_page(id, "page_replace_blocks", |page| page.blocks = blocks)
    }

    /// Writes a finished editor session back (blocks and title).
    pub fn commit(&mut self, editor: EditorService) -> bool {
        let edited = editor.into_page();
        let id = edited.id.clone();
        self.update_page(&id, "page_commit", |page| {
            page.title = edited.title;
            page.blocks = edited.blocks;
        })
    }

    pub fn rename_page(&mut self, id: &PageId, title: impl Into<String>) -> bool {
        let title = title.into();
        self.update_page(id, "page_rename", |page| page.title = title)
    }

    pub fn toggle_favorite(&mut self, id: &PageId) -> bool {
        self.update_page(id, "page_favorite", |page| {
            page.is_favorite = Some(!page.is_favorite());
        })
    }

    fn update_page(&mut self, id: &PageId, event: &str, apply: impl FnOnce(&mut Page)) -> bool {
        let Some(index) = self.pages.iter().position(|page| &page.id == id) else {
            debug!("event={event} module=workspace status=skipped reason=unknown_id page_id={id}");
            return false;
        };

        let mut next = self.pages.to_vec();
        apply(&mut next[index]);
        self.pages = next.into();
        debug!("event={event} module=workspace status=ok page_id={id}");
        true
    }

    fn fresh_id(&self) -> PageId {
        loop {
            let id = PageId::new(self.ids.next_id());
            if self.page(&id).is_none() {
                return id;
            }
        }
    }
}

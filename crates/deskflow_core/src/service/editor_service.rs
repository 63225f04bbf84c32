//! Block document editor use-case service.
//!
//! # Responsibility
//! - Own one page's ordered block sequence while it is being edited.
//! - Provide insert/delete/update operations and the keyboard policy that
//!   maps submit to block split and erase-on-empty to block delete.
//! - Report focus transfers as data instead of performing them.
//!
//! # Invariants
//! - Block ids stay unique within the page.
//! - A block's type never changes; content updates of another type are
//!   ignored.
//! - Every effective mutation installs a new immutable block sequence and
//!   bumps `revision`; no-ops leave both untouched.
//! - A focus target is only ever emitted together with the snapshot that
//!   contains the target block. The presentation layer applies it after it
//!   has rendered that snapshot.
//! - The editor never creates a block on its own, even when the page is
//!   empty.

use crate::model::block::{Block, BlockContent, BlockKind};
use crate::model::ids::{retain_first_by_id, BlockId, IdGenerator, RandomIdGenerator};
use crate::model::page::Page;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Immutable view of the edited page's blocks at one revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub revision: u64,
    pub blocks: Arc<[Block]>,
}

impl PageSnapshot {
    pub fn block_ids(&self) -> Vec<&BlockId> {
        self.blocks.iter().map(Block::id).collect()
    }
}

/// Result of one editor mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorUpdate {
    /// State after the mutation.
    pub snapshot: PageSnapshot,
    /// Block whose input should receive focus once `snapshot` is rendered.
    pub focus: Option<BlockId>,
}

/// Keys the editor assigns structural meaning to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    /// Line submit (Enter).
    Submit,
    /// Backward erase (Backspace).
    Erase,
    /// Any other key; always left to the input field.
    Other,
}

/// One key press on a block input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: EditorKey,
    /// Whether a modifier (Shift) was held.
    pub with_modifier: bool,
}

impl KeyPress {
    pub fn plain(key: EditorKey) -> Self {
        Self {
            key,
            with_modifier: false,
        }
    }

    pub fn with_modifier(key: EditorKey) -> Self {
        Self {
            key,
            with_modifier: true,
        }
    }
}

/// Editor decision for one key press.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyOutcome {
    /// Whether the input field must suppress its default effect.
    pub prevent_default: bool,
    /// Structural change triggered by the key, if any.
    pub update: Option<EditorUpdate>,
}

impl KeyOutcome {
    fn pass_through() -> Self {
        Self {
            prevent_default: false,
            update: None,
        }
    }

    fn handled(update: EditorUpdate) -> Self {
        Self {
            prevent_default: true,
            update: Some(update),
        }
    }
}

/// Editor shared across threads behind one coarse lock.
pub type SharedEditor = Arc<Mutex<EditorService>>;

/// Editor engine for one page.
pub struct EditorService {
    page: Page,
    revision: u64,
    pending_focus: Option<BlockId>,
    ids: Box<dyn IdGenerator>,
}

impl EditorService {
    /// Opens `page` for editing with random block ids.
    pub fn open(page: Page) -> Self {
        Self::with_id_generator(page, Box::new(RandomIdGenerator))
    }

    /// Opens `page` with a caller-provided id generator.
    ///
    /// Blocks repeating an earlier id are dropped.
    pub fn with_id_generator(mut page: Page, ids: Box<dyn IdGenerator>) -> Self {
        if !page.has_unique_block_ids() {
            page.blocks = retain_first_by_id(page.blocks.to_vec(), "editor", Block::id).into();
        }
        Self {
            page,
            revision: 0,
            pending_focus: None,
            ids,
        }
    }

    pub fn into_shared(self) -> SharedEditor {
        Arc::new(Mutex::new(self))
    }

    /// Current page, including the latest block sequence and title.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Closes the editor and hands the edited page back.
    pub fn into_page(self) -> Page {
        self.page
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            revision: self.revision,
            blocks: Arc::clone(&self.page.blocks),
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.page.blocks
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.page.blocks.iter().find(|block| block.id() == id)
    }

    /// Takes the focus target of the last mutation, if it is still pending.
    pub fn take_focus_target(&mut self) -> Option<BlockId> {
        self.pending_focus.take()
    }

    /// Inserts an empty block of `kind` right after `after`.
    ///
    /// Appends when `after` is `None` or unknown. With `focus`, the new
    /// block becomes the focus target.
    pub fn insert_block(
        &mut self,
        kind: BlockKind,
        after: Option<&BlockId>,
        focus: bool,
    ) -> (Block, EditorUpdate) {
        self.insert_block_with(BlockContent::empty(kind), after, focus)
    }

    /// Inserts a block carrying `content`, with the placement and focus
    /// rules of [`EditorService::insert_block`].
    pub fn insert_block_with(
        &mut self,
        content: BlockContent,
        after: Option<&BlockId>,
        focus: bool,
    ) -> (Block, EditorUpdate) {
        let block = Block::new(self.fresh_id(), content);
        let position = after.and_then(|id| self.position(id));

        let mut next = self.page.blocks.to_vec();
        match position {
            Some(index) => next.insert(index + 1, block.clone()),
            None => next.push(block.clone()),
        }
        self.install(next);

        let focus = focus.then(|| block.id().clone());
        debug!(
            "event=block_insert module=editor status=ok block_id={} block_type={} placement={} revision={}",
            block.id(),
            block.kind().as_str(),
            if position.is_some() { "after" } else { "append" },
            self.revision
        );
        let update = self.update_with_focus(focus);
        (block, update)
    }

    /// Removes the block with `id`.
    ///
    /// With `focus_previous`, the block that preceded it becomes the focus
    /// target; the first block has no predecessor and yields no target.
    /// Unknown ids are ignored.
    pub fn delete_block(&mut self, id: &BlockId, focus_previous: bool) -> EditorUpdate {
        let Some(index) = self.position(id) else {
            debug!("event=block_delete module=editor status=skipped reason=unknown_id block_id={id}");
            return self.update_with_focus(None);
        };

        let predecessor = if focus_previous && index > 0 {
            Some(self.page.blocks[index - 1].id().clone())
        } else {
            None
        };

        let next = self
            .page
            .blocks
            .iter()
            .filter(|block| block.id() != id)
            .cloned()
            .collect();
        self.install(next);
        if self.pending_focus.as_ref() == Some(id) {
            self.pending_focus = None;
        }
        debug!(
            "event=block_delete module=editor status=ok block_id={id} focus_previous={} revision={}",
            predecessor.is_some(),
            self.revision
        );
        self.update_with_focus(predecessor)
    }

    /// Replaces the payload of the block with `id`.
    ///
    /// Ignored when the id is unknown or `content` belongs to another block
    /// type.
    pub fn update_block_content(&mut self, id: &BlockId, content: BlockContent) -> EditorUpdate {
        let Some(index) = self.position(id) else {
            debug!("event=block_update module=editor status=skipped reason=unknown_id block_id={id}");
            return self.update_with_focus(None);
        };

        let current = &self.page.blocks[index];
        let Some(replacement) = current.with_content(content) else {
            debug!(
                "event=block_update module=editor status=skipped reason=type_mismatch block_id={id} block_type={}",
                current.kind().as_str()
            );
            return self.update_with_focus(None);
        };

        let mut next = self.page.blocks.to_vec();
        next[index] = replacement;
        self.install(next);
        self.update_with_focus(None)
    }

    /// Flips the checkbox of a todo block; other blocks are left alone.
    pub fn toggle_todo(&mut self, id: &BlockId) -> EditorUpdate {
        match self.block(id).map(Block::content) {
            Some(BlockContent::Todo(item)) => {
                let mut item = item.clone();
                item.checked = !item.checked;
                self.update_block_content(id, BlockContent::Todo(item))
            }
            Some(other) => {
                debug!(
                    "event=todo_toggle module=editor status=skipped reason=not_todo block_id={id} block_type={}",
                    other.kind().as_str()
                );
                self.update_with_focus(None)
            }
            None => {
                debug!("event=todo_toggle module=editor status=skipped reason=unknown_id block_id={id}");
                self.update_with_focus(None)
            }
        }
    }

    /// Sets the page title.
    pub fn rename(&mut self, title: impl Into<String>) {
        self.page.title = title.into();
    }

    /// Submit policy: splits the document after `block` with a new text
    /// block and suppresses the newline.
    pub fn handle_submit_key(&mut self, block: &Block) -> KeyOutcome {
        let (_, update) = self.insert_block(BlockKind::Text, Some(block.id()), true);
        KeyOutcome::handled(update)
    }

    /// Erase policy: an empty text block, or a todo block with empty text,
    /// is deleted and focus moves to its predecessor. Anything else keeps
    /// the field's own erase behavior.
    ///
    /// Emptiness is judged on the page's current copy of the block, not on
    /// `block`; blocks no longer on the page pass through.
    pub fn handle_erase_on_empty_key(&mut self, block: &Block) -> KeyOutcome {
        let id = block.id();
        let Some(current) = self.block(id) else {
            debug!("event=block_erase module=editor status=skipped reason=unknown_id block_id={id}");
            return KeyOutcome::pass_through();
        };
        if !current.content().is_erasable_when_empty() {
            return KeyOutcome::pass_through();
        }
        let update = self.delete_block(id, true);
        KeyOutcome::handled(update)
    }

    /// Dispatches one key press on `block` to the matching policy.
    pub fn handle_key(&mut self, block: &Block, press: KeyPress) -> KeyOutcome {
        match press.key {
            EditorKey::Submit if !press.with_modifier => self.handle_submit_key(block),
            EditorKey::Erase => self.handle_erase_on_empty_key(block),
            _ => KeyOutcome::pass_through(),
        }
    }

    fn position(&self, id: &BlockId) -> Option<usize> {
        self.page.blocks.iter().position(|block| block.id() == id)
    }

    fn install(&mut self, blocks: Vec<Block>) {
        self.page.blocks = blocks.into();
        self.revision += 1;
    }

    fn update_with_focus(&mut self, focus: Option<BlockId>) -> EditorUpdate {
        if focus.is_some() {
            self.pending_focus = focus.clone();
        }
        EditorUpdate {
            snapshot: self.snapshot(),
            focus,
        }
    }

    fn fresh_id(&self) -> BlockId {
        loop {
            let id = BlockId::new(self.ids.next_id());
            if self.position(&id).is_none() {
                return id;
            }
        }
    }
}

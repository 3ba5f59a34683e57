//! Editing session facade.
//!
//! Bundles the document with its interaction state (history, selection,
//! pivot context, viewport, pen tool) and routes every mutation through
//! the command engine, so the spatial index and undo stack can never drift
//! apart. Hosts that need finer control can drive the parts directly; the
//! facade is the supported path for ordinary editing flows.

use tracing::debug;

use vectorkit_core::Result;

use crate::commands::DocumentCommand;
use crate::document::Document;
use crate::history::CommandStack;
use crate::item::{Item, ItemId};
use crate::pen_tool::{PathStyle, PenToolState};
use crate::query;
use crate::selection::{EditContext, SelectionManager};
use crate::viewport::Viewport;

/// One editing session over a document.
#[derive(Default)]
pub struct Editor {
    pub document: Document,
    pub history: CommandStack,
    pub selection: SelectionManager,
    pub edit_context: EditContext,
    pub viewport: Viewport,
    pub pen_tool: PenToolState,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session over a loaded document. Interaction state does not
    /// survive a load: history, selection, and pivots start clean.
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    fn run(&mut self, command: DocumentCommand) {
        self.history.execute(command, &mut self.document);
    }

    /// Adds an item on top of the document, returning its position.
    pub fn add_item(&mut self, item: Item) -> usize {
        let index = self.document.len();
        self.run(DocumentCommand::add_item(&self.document, item));
        index
    }

    /// Deletes the selection (containers recursively); locked items are
    /// refused. Returns the number of items removed.
    pub fn delete_selected(&mut self) -> usize {
        let indices = self.selection.selected().to_vec();
        let Some(command) = DocumentCommand::remove_items(&self.document, &indices) else {
            return 0;
        };
        let count = command.removal_count();
        self.run(command);
        self.selection.clear();
        self.edit_context.clear();
        count
    }

    /// Moves the selection (container subtrees included) by a delta.
    pub fn translate_selected(&mut self, dx: f64, dy: f64) {
        let indices = self.selection.selected().to_vec();
        if let Some(command) = DocumentCommand::translate_items(&self.document, &indices, dx, dy) {
            self.run(command);
        }
    }

    /// Groups the selection under a fresh container and selects it.
    pub fn group_selected(&mut self) -> Option<ItemId> {
        let indices = self.selection.selected().to_vec();
        if indices.len() < 2 {
            return None;
        }
        let command = DocumentCommand::group_items(&self.document, &indices)?;
        let group_id = command.created_id().cloned();
        self.run(command);
        self.selection.clear();
        let group_index = group_id.as_ref().and_then(|id| self.document.index_of(id));
        if group_index.is_some() {
            self.selection.toggle(group_index, false);
        }
        group_id
    }

    /// Dissolves the selected container, selecting its former children.
    pub fn ungroup_selected(&mut self) {
        let Some(primary) = self.selection.primary() else {
            return;
        };
        let Some(command) = DocumentCommand::ungroup_items(&self.document, primary) else {
            return;
        };
        self.run(command);
        self.selection.prune(&self.document);
    }

    /// Duplicates the selection with an offset, selecting the copies.
    pub fn duplicate_selected(&mut self, dx: f64, dy: f64) {
        let indices = self.selection.selected().to_vec();
        let base = self.document.len();
        if let Some(command) = DocumentCommand::duplicate_items(&self.document, &indices, dx, dy) {
            self.run(command);
            self.selection.clear();
            for index in base..self.document.len() {
                self.selection.toggle(Some(index), true);
            }
        }
    }

    /// Replaces an item wholesale (property edits, resize results).
    pub fn change_item(&mut self, index: usize, new: Item) {
        if let Some(command) = DocumentCommand::change_item(&self.document, index, new) {
            self.run(command);
        }
    }

    /// Moves an item under a new parent; a cycle is a validation error.
    pub fn reparent_item(&mut self, index: usize, new_parent: Option<ItemId>) -> Result<()> {
        if let Some(command) = DocumentCommand::reparent_item(&self.document, index, new_parent)? {
            self.run(command);
        }
        Ok(())
    }

    /// Commits the pen tool's accumulated points as a path item and resets
    /// the tool. Fewer than two points is a validation error and leaves
    /// the tool untouched.
    pub fn commit_pen_path(&mut self, style: &PathStyle) -> Result<usize> {
        let item = self.pen_tool.to_item(style)?;
        self.pen_tool.reset();
        debug!(id = %item.id, "committed pen path");
        Ok(self.add_item(item))
    }

    /// Selects the topmost visible item at a canvas point, honoring the
    /// multi-select toggle rule.
    pub fn select_at(&mut self, x: f64, y: f64, multi: bool) -> Option<usize> {
        let hit = query::hit_test_at(&self.document, x, y).map(|(index, _)| index);
        self.selection.toggle(hit, multi);
        hit
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.document);
        if undone {
            self.selection.prune(&self.document);
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.document);
        if redone {
            self.selection.prune(&self.document);
        }
        redone
    }

    /// Groups the commands of one gesture into a single undo step.
    pub fn begin_transaction(&mut self, label: impl Into<String>) {
        self.history.begin_transaction(label);
    }

    pub fn end_transaction(&mut self) {
        self.history.end_transaction();
    }
}

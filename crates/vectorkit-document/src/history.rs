//! Undo/redo engine.
//!
//! Two stacks plus an explicit transaction state. While a transaction is
//! open, executed commands accumulate in its buffer and the stacks are
//! untouched; committing wraps the buffer into a single composite command
//! that undoes in reverse order and redoes in forward order.
//!
//! Registered observers are notified synchronously after every stack
//! mutation so UI affordances (undo/redo buttons, menu labels) stay in
//! sync without polling.

use tracing::debug;

use crate::commands::DocumentCommand;
use crate::document::Document;

const DEFAULT_MAX_DEPTH: usize = 100;

/// Observer invoked with (can_undo, can_redo) after each stack mutation.
pub type ChangeObserver = Box<dyn Fn(bool, bool)>;

/// Whether a transaction is currently buffering commands.
enum TransactionState {
    Inactive,
    Active {
        label: String,
        buffer: Vec<DocumentCommand>,
    },
}

/// Stack-based undo/redo engine with transaction grouping.
pub struct CommandStack {
    undo_stack: Vec<DocumentCommand>,
    redo_stack: Vec<DocumentCommand>,
    transaction: TransactionState,
    observers: Vec<ChangeObserver>,
    max_depth: usize,
}

impl Default for CommandStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl CommandStack {
    /// Creates an engine keeping at most `max_depth` undo entries; the
    /// oldest entries are dropped beyond that.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            transaction: TransactionState::Inactive,
            observers: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Registers a change observer. Notification is synchronous and occurs
    /// after the stack mutation completes.
    pub fn on_change(&mut self, observer: impl Fn(bool, bool) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&self) {
        let can_undo = self.can_undo();
        let can_redo = self.can_redo();
        for observer in &self.observers {
            observer(can_undo, can_redo);
        }
    }

    fn push_undo(&mut self, command: DocumentCommand) {
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(command);
    }

    /// Runs the command against the document. Inside a transaction the
    /// command lands in the buffer and the stacks (and observers) are
    /// untouched; otherwise it is pushed onto the undo stack and the redo
    /// stack is cleared.
    pub fn execute(&mut self, mut command: DocumentCommand, document: &mut Document) {
        command.apply(document);
        match &mut self.transaction {
            TransactionState::Active { buffer, .. } => {
                buffer.push(command);
            }
            TransactionState::Inactive => {
                self.push_undo(command);
                self.redo_stack.clear();
                self.notify();
            }
        }
    }

    /// Reverts the most recent undo entry. False on an empty stack.
    pub fn undo(&mut self, document: &mut Document) -> bool {
        let Some(mut command) = self.undo_stack.pop() else {
            return false;
        };
        debug!(command = command.description(), "undo");
        command.undo(document);
        self.redo_stack.push(command);
        self.notify();
        true
    }

    /// Re-applies the most recently undone entry. False on an empty stack.
    pub fn redo(&mut self, document: &mut Document) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };
        debug!(command = command.description(), "redo");
        command.apply(document);
        self.undo_stack.push(command);
        self.notify();
        true
    }

    /// Starts buffering commands under one label. A begin while already
    /// buffering is ignored; only the outermost transaction counts.
    pub fn begin_transaction(&mut self, label: impl Into<String>) {
        if matches!(self.transaction, TransactionState::Inactive) {
            self.transaction = TransactionState::Active {
                label: label.into(),
                buffer: Vec::new(),
            };
        }
    }

    /// Commits the open transaction as a single composite undo step. An
    /// empty buffer is discarded silently, and an end without a matching
    /// begin is a no-op.
    pub fn end_transaction(&mut self) {
        let state = std::mem::replace(&mut self.transaction, TransactionState::Inactive);
        let TransactionState::Active { label, buffer } = state else {
            return;
        };
        if buffer.is_empty() {
            return;
        }
        debug!(label = %label, commands = buffer.len(), "commit transaction");
        self.push_undo(DocumentCommand::composite(label, buffer));
        self.redo_stack.clear();
        self.notify();
    }

    /// True while a transaction is buffering.
    pub fn in_transaction(&self) -> bool {
        matches!(self.transaction, TransactionState::Active { .. })
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Description of the command `undo` would revert.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.description())
    }

    /// Description of the command `redo` would re-apply.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.description())
    }

    /// Drops both stacks and any open transaction buffer.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.transaction = TransactionState::Inactive;
        self.notify();
    }
}

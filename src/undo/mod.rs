//! Linear undo/redo history of single-byte edits.
//!
//! Actions are kept in chronological order. A roaming position marks how far
//! into the history the buffer currently reflects: everything up to and
//! including the position has been applied, everything after it has been
//! undone and is kept only for redo. Recording a new action discards that
//! undone suffix.

use std::fmt;

use crate::buffer::ByteBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Delete,
    Insert,
    Replace,
    Append,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Delete => write!(f, "delete"),
            ActionKind::Insert => write!(f, "insert"),
            ActionKind::Replace => write!(f, "replace"),
            ActionKind::Append => write!(f, "append"),
        }
    }
}

/// One reversible edit.
///
/// `byte` holds whatever is needed to invert the edit: the removed byte for
/// `Delete`, the added byte for `Insert`/`Append`, and the value that is *not*
/// currently in the buffer for `Replace` (swapped on every undo and redo).
///
/// For `Append`, `offset` is the cursor offset before appending; the byte
/// itself lives at `offset + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub offset: usize,
    pub byte: u8,
}

/// Where the history currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryPosition {
    /// No actions recorded.
    Empty,
    /// Every action has been undone.
    BeforeHead,
    /// Actions `0..=i` are applied; the rest are undone.
    At(usize),
    /// Every action is applied; nothing to redo.
    AfterTail,
}

/// Result of replaying an action through undo or redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub kind: ActionKind,
    /// Offset the viewport should be brought to.
    pub offset: usize,
}

#[derive(Debug)]
pub struct UndoLog {
    actions: Vec<Action>,
    position: HistoryPosition,
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoLog {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            position: HistoryPosition::Empty,
        }
    }

    /// Record a user edit that has already been applied to the buffer.
    pub fn record(&mut self, kind: ActionKind, offset: usize, byte: u8) {
        match self.position {
            HistoryPosition::At(i) => self.actions.truncate(i + 1),
            HistoryPosition::BeforeHead => self.actions.clear(),
            HistoryPosition::AfterTail | HistoryPosition::Empty => {}
        }
        self.actions.push(Action { kind, offset, byte });
        self.position = HistoryPosition::AfterTail;
        tracing::debug!(target: "undo", %kind, offset, byte, size = self.actions.len(), "record");
    }

    /// Revert the most recent applied action. Returns `None` when there is
    /// nothing left to undo.
    pub fn undo(&mut self, buffer: &mut ByteBuffer) -> Option<Applied> {
        if self.position == HistoryPosition::AfterTail {
            self.position = HistoryPosition::At(self.actions.len() - 1);
        }
        let HistoryPosition::At(i) = self.position else {
            return None;
        };

        let action = &mut self.actions[i];
        let applied = match action.kind {
            ActionKind::Append => buffer.delete(action.offset + 1).map(|_| ()),
            ActionKind::Delete => {
                buffer.insert(action.offset, action.byte, false);
                Some(())
            }
            ActionKind::Replace => buffer
                .replace(action.offset, action.byte)
                .map(|previous| action.byte = previous),
            ActionKind::Insert => buffer.delete(action.offset).map(|_| ()),
        };
        if applied.is_none() {
            tracing::warn!(target: "undo", kind = %action.kind, offset = action.offset, len = buffer.len(), "undo_out_of_range");
            return None;
        }

        let applied = Applied {
            kind: action.kind,
            offset: action.offset,
        };
        self.position = match i {
            0 => HistoryPosition::BeforeHead,
            i => HistoryPosition::At(i - 1),
        };
        tracing::debug!(target: "undo", kind = %applied.kind, offset = applied.offset, position = self.position(), "undo");
        Some(applied)
    }

    /// Re-apply the next undone action. Returns `None` when there is nothing
    /// to redo.
    pub fn redo(&mut self, buffer: &mut ByteBuffer) -> Option<Applied> {
        let next = match self.position {
            HistoryPosition::Empty | HistoryPosition::AfterTail => return None,
            HistoryPosition::BeforeHead => 0,
            HistoryPosition::At(i) if i + 1 >= self.actions.len() => return None,
            HistoryPosition::At(i) => i + 1,
        };

        let action = &mut self.actions[next];
        let landed = match action.kind {
            ActionKind::Append => Some(buffer.insert(action.offset, action.byte, true)),
            ActionKind::Delete => buffer.delete(action.offset).map(|_| action.offset),
            ActionKind::Replace => buffer.replace(action.offset, action.byte).map(|previous| {
                action.byte = previous;
                action.offset
            }),
            ActionKind::Insert => Some(buffer.insert(action.offset, action.byte, false)),
        };
        let Some(offset) = landed else {
            tracing::warn!(target: "undo", kind = %action.kind, offset = action.offset, len = buffer.len(), "redo_out_of_range");
            return None;
        };

        let applied = Applied {
            kind: action.kind,
            offset,
        };
        self.position = if next + 1 == self.actions.len() {
            HistoryPosition::AfterTail
        } else {
            HistoryPosition::At(next)
        };
        tracing::debug!(target: "undo", kind = %applied.kind, offset, position = self.position(), "redo");
        Some(applied)
    }

    /// Number of actions held, including undone ones still available for redo.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// 1-based ordinal of the last applied action, 0 when none is applied.
    pub fn position(&self) -> usize {
        match self.position {
            HistoryPosition::Empty | HistoryPosition::BeforeHead => 0,
            HistoryPosition::At(i) => i + 1,
            HistoryPosition::AfterTail => self.actions.len(),
        }
    }

    pub fn status(&self) -> HistoryPosition {
        self.position
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

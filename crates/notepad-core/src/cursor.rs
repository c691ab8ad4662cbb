//! Cursor — the last known insertion point, cached for the status bar.
//!
//! The `Cursor` is a lightweight value type: just a position. It does not own
//! or reference the buffer. The editor updates it after every edit or
//! navigation event and clamps it when the buffer changes underneath it.
//!
//! No validation happens here beyond [`clamp`](Cursor::clamp); positions
//! reaching the cursor have already been checked by the buffer.

use crate::buffer::Buffer;
use crate::position::Position;

/// The insertion cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pos: Position,
}

impl Cursor {
    /// Create a cursor at the origin.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pos: Position::ORIGIN,
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Current position.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> Position {
        self.pos
    }

    // -- Updates ------------------------------------------------------------

    /// Record the insertion point after an edit.
    #[inline]
    pub const fn on_edit(&mut self, pos: Position) {
        self.pos = pos;
    }

    /// Record an explicit move (click, arrow key, find-next).
    #[inline]
    pub const fn on_move(&mut self, pos: Position) {
        self.pos = pos;
    }

    /// Back to line 1, column 0.
    #[inline]
    pub const fn reset(&mut self) {
        self.pos = Position::ORIGIN;
    }

    /// Snap the cursor to the nearest valid position after the buffer
    /// changed underneath it.
    pub fn clamp(&mut self, buf: &Buffer) {
        self.pos = buf.clamp_position(self.pos);
    }

    // -- Display ------------------------------------------------------------

    /// The status bar text, e.g. `"Line: 3 | Column: 7"`.
    #[must_use]
    pub fn status_text(&self) -> String {
        format!("Line: {} | Column: {}", self.pos.line, self.pos.col)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

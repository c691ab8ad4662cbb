//! Text position and range types.
//!
//! Lines are **1-indexed** and columns are **0-indexed**, the same convention
//! the status bar shows (`Line: 1 | Column: 0` is the very first character
//! boundary). Columns count Unicode scalar values (chars), not bytes or
//! grapheme clusters. This matches how `ropey` indexes text.
//!
//! A position names a character *boundary*, not a character: on the line
//! `"café"` the valid columns are `0..=4`, where column 4 sits after `'é'`.
//!
//! Positions and ranges are plain values. Whether a position is valid depends
//! on the buffer it is used with; [`Buffer`](crate::buffer::Buffer) checks that
//! and reports [`OutOfRange`](crate::error::OutOfRange) otherwise.

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A position in a text buffer: 1-based `line`, 0-based `col`.
///
/// # Ordering
///
/// Positions are ordered lexicographically: line first, then column. This means
/// `Position { line: 1, col: 5 }` < `Position { line: 2, col: 0 }`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// The start of every buffer — line 1, column 0.
    pub const ORIGIN: Self = Self { line: 1, col: 0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// The position just past `text` if it were inserted here.
    ///
    /// `\n`, `\r\n` and a lone `\r` each count as one line break.
    #[must_use]
    pub fn advanced_by(self, text: &str) -> Self {
        let mut line = self.line;
        let mut col = self.col;
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '\n' => {
                    line += 1;
                    col = 0;
                }
                '\r' => {
                    line += 1;
                    col = 0;
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                }
                _ => col += 1,
            }
        }

        Self::new(line, col)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

// Natural ordering: line first, then column.
impl Ord for Position {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}.{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.line, self.col)
    }
}

/// Error returned when a `"L.C"` index string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid position `{0}` (expected LINE.COLUMN, line >= 1)")]
pub struct ParsePositionError(pub String);

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parse `"L.C"`, e.g. `"1.0"` or `"12.7"`. Line 0 is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError(s.to_string());
        let (line, col) = s.trim().split_once('.').ok_or_else(err)?;
        let line: usize = line.parse().map_err(|_| err())?;
        let col: usize = col.parse().map_err(|_| err())?;
        if line == 0 {
            return Err(err());
        }
        Ok(Self::new(line, col))
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open range in a text buffer: `[start, end)`.
///
/// `start` is inclusive, `end` is exclusive. An empty range has `start == end`.
/// Ranges are normalized so that `start <= end` — use [`Range::new`] which
/// checks this in debug builds, or [`Range::ordered`] on untrusted input.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a range. Panics in debug if `start > end`.
    #[inline]
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.line < end.line || (start.line == end.line && start.col <= end.col),
            "Range::new requires start <= end"
        );
        Self { start, end }
    }

    /// Create a range from two arbitrary positions, swapping if needed so
    /// that `start <= end`. Selections dragged backwards come in this way.
    #[inline]
    #[must_use]
    pub fn ordered(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// True when the range spans zero characters (`start == end`).
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start.line == self.end.line && self.start.col == self.end.col
    }

    /// True when `start <= end`. Ranges built with struct literals can break
    /// this; buffer operations reject them.
    #[inline]
    #[must_use]
    pub fn is_ordered(self) -> bool {
        self.start <= self.end
    }

    /// True when the given position falls within `[start, end)`.
    #[inline]
    #[must_use]
    pub fn contains(self, pos: Position) -> bool {
        pos >= self.start && pos < self.end
    }

    /// True when `other` lies entirely inside this range.
    #[inline]
    #[must_use]
    pub fn encloses(self, other: Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Range({}.{} .. {}.{})",
            self.start.line, self.start.col, self.end.line, self.end.col
        )
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

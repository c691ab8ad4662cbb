//! Text buffer — the document's single source of truth for content.
//!
//! A `Buffer` wraps a [`ropey::Rope`] with editing operations, conversion
//! between [`Position`] (line, col) and linear char offsets, file I/O, and
//! metadata tracking (path, modified flag, line endings).
//!
//! # Design choices
//!
//! - **ropey** provides O(log n) insert/delete at any position and efficient
//!   line indexing. The crate is built with only LF line breaks enabled, so a
//!   rope line is exactly a `\n`-terminated line of the document.
//!
//! - **Line endings are normalized on the way in.** Text loaded or inserted
//!   with `\r\n` or lone `\r` is stored with `\n`. The dominant style of the
//!   loaded text is remembered in [`LineEnding`] and restored by
//!   [`serialized`](Buffer::serialized) and [`save_as`](Buffer::save_as).
//!
//! - **Offsets are char offsets.** The offset of `(line, col)` is the sum of
//!   the preceding lines' lengths, one separator per preceding line, and `col`.
//!   That is exactly the rope's char index, so both directions are O(log n).
//!
//! - **Every coordinate is checked.** Invalid positions and ranges produce
//!   [`OutOfRange`] instead of panicking.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ropey::{Rope, RopeSlice};

use crate::error::OutOfRange;
use crate::position::{Position, Range};

// ---------------------------------------------------------------------------
// Line ending detection
// ---------------------------------------------------------------------------

/// Line ending style of a document.
///
/// Detected on load by scanning for the first occurrence. Defaults to `Lf`
/// for new buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineEnding {
    /// `\n` — Unix, macOS, Linux.
    #[default]
    Lf,
    /// `\r\n` — Windows, DOS.
    CrLf,
    /// `\r` — Classic Mac (pre-OS X).
    Cr,
}

impl LineEnding {
    /// The string representation of this line ending.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }

    /// Detect the dominant line ending in a string by finding the first
    /// occurrence. Returns `Lf` if no line endings are found.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        for (i, &byte) in bytes.iter().enumerate() {
            if byte == b'\n' {
                return Self::Lf;
            }
            if byte == b'\r' {
                if bytes.get(i + 1) == Some(&b'\n') {
                    return Self::CrLf;
                }
                return Self::Cr;
            }
        }
        Self::Lf
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lf => f.write_str("LF"),
            Self::CrLf => f.write_str("CRLF"),
            Self::Cr => f.write_str("CR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

/// A text buffer backed by a rope.
///
/// # Coordinate system
///
/// Positions are `(line, col)` pairs with 1-based lines and 0-based char
/// columns. A column may equal the line's content length (the boundary after
/// the last character) but never reaches into the line separator. Use
/// [`offset_of`](Self::offset_of) and [`position_of`](Self::position_of) to
/// convert to and from linear char offsets.
pub struct Buffer {
    rope: Rope,
    path: Option<PathBuf>,
    modified: bool,
    line_ending: LineEnding,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer with no file path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            path: None,
            modified: false,
            line_ending: LineEnding::Lf,
        }
    }

    /// Create a buffer from a string. Line endings are detected and
    /// normalized.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.load(text);
        buf
    }

    /// Load a buffer from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid UTF-8.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut buf = Self::from_text(&text);
        buf.path = Some(path.to_path_buf());
        Ok(buf)
    }

    /// Replace the content with freshly loaded text: detects the line ending
    /// style and leaves the buffer unmodified. The path is kept.
    pub fn load(&mut self, text: &str) {
        self.line_ending = LineEnding::detect(text);
        self.rope = Rope::from_str(&normalize_line_endings(text));
        self.modified = false;
    }

    // -- Text access --------------------------------------------------------

    /// The underlying rope.
    #[inline]
    #[must_use]
    pub const fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Total number of lines. An empty buffer has 1 line (the empty line).
    /// A buffer ending with `\n` has a trailing empty line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count (Unicode scalar values, not bytes).
    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// True when the buffer contains no text.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Get a line by 1-based line number, including its trailing `\n` (if
    /// any). Returns `None` if the line doesn't exist.
    #[inline]
    #[must_use]
    pub fn line(&self, line: usize) -> Option<RopeSlice<'_>> {
        if line >= 1 && line <= self.rope.len_lines() {
            Some(self.rope.line(line - 1))
        } else {
            None
        }
    }

    /// Number of chars in a line **excluding** the trailing `\n`. This is the
    /// largest valid column on that line.
    ///
    /// Returns `None` if the line doesn't exist.
    #[must_use]
    pub fn line_content_len(&self, line: usize) -> Option<usize> {
        self.line(line).map(|rope_line| {
            let total = rope_line.len_chars();
            if total > 0 && rope_line.char(total - 1) == '\n' {
                total - 1
            } else {
                total
            }
        })
    }

    /// True when `pos` addresses a character boundary in this buffer.
    #[must_use]
    pub fn is_valid(&self, pos: Position) -> bool {
        self.line_content_len(pos.line)
            .is_some_and(|len| pos.col <= len)
    }

    /// Extract a copy of the text in `range`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if either endpoint is invalid or the range is
    /// inverted.
    pub fn text_of(&self, range: Range) -> Result<String, OutOfRange> {
        let (start, end) = self.char_span(range)?;
        Ok(self.rope.slice(start..end).to_string())
    }

    /// The entire content, lines joined by `\n`.
    #[must_use]
    pub fn full_text(&self) -> String {
        self.rope.to_string()
    }

    /// The entire content with line endings converted to the buffer's
    /// [`line_ending`](Self::line_ending) style. This is what gets written to
    /// disk.
    #[must_use]
    pub fn serialized(&self) -> String {
        let text = self.full_text();
        match self.line_ending {
            LineEnding::Lf => text,
            ending => text.replace('\n', ending.as_str()),
        }
    }

    // -- Coordinate conversion ----------------------------------------------

    /// Convert a `Position` to a linear char offset.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange::Position`] if the line doesn't exist or the column
    /// exceeds the line's content length.
    pub fn offset_of(&self, pos: Position) -> Result<usize, OutOfRange> {
        if !self.is_valid(pos) {
            return Err(OutOfRange::Position(pos));
        }
        Ok(self.rope.line_to_char(pos.line - 1) + pos.col)
    }

    /// Convert a linear char offset to a `Position`.
    ///
    /// An offset equal to [`len_chars`](Self::len_chars) is valid and maps to
    /// the position just past the last character.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange::Offset`] if `offset > len_chars()`.
    pub fn position_of(&self, offset: usize) -> Result<Position, OutOfRange> {
        let len = self.rope.len_chars();
        if offset > len {
            return Err(OutOfRange::Offset { offset, len });
        }
        Ok(self.char_position(offset))
    }

    /// Clamp a position to the nearest valid position in the buffer.
    ///
    /// - Line 0 becomes line 1; lines past the end become the last line.
    /// - Columns past the end of the line become its content length.
    #[must_use]
    pub fn clamp_position(&self, pos: Position) -> Position {
        let line = pos.line.clamp(1, self.line_count());
        let max_col = self.line_content_len(line).unwrap_or(0);
        Position::new(line, pos.col.min(max_col))
    }

    // -- Editing ------------------------------------------------------------

    /// Insert text at a position, splitting lines where `text` contains line
    /// breaks (any style; they are stored as `\n`).
    ///
    /// Returns the position just past the inserted text. Anything recorded
    /// elsewhere at or after `pos` is now stale; re-anchoring it is the
    /// caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `pos` is invalid.
    pub fn insert(&mut self, pos: Position, text: &str) -> Result<Position, OutOfRange> {
        let idx = self.offset_of(pos)?;
        let text = normalize_line_endings(text);
        if text.is_empty() {
            return Ok(pos);
        }
        self.rope.insert(idx, &text);
        self.modified = true;
        Ok(pos.advanced_by(&text))
    }

    /// Delete the text in a range and return it.
    ///
    /// Both endpoints are validated first. An empty range is then a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if either endpoint is invalid or the range is
    /// inverted.
    pub fn delete(&mut self, range: Range) -> Result<String, OutOfRange> {
        let (start, end) = self.char_span(range)?;
        if start == end {
            return Ok(String::new());
        }
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        self.modified = true;
        Ok(removed)
    }

    /// Replace the entire content. Always succeeds. The line ending style is
    /// kept, so a rewrite of a CRLF document is saved as CRLF.
    pub fn replace_all(&mut self, text: &str) {
        self.rope = Rope::from_str(&normalize_line_endings(text));
        self.modified = true;
    }

    // -- Metadata -----------------------------------------------------------

    /// The file path this buffer is associated with, if any.
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// True if the buffer has been modified since the last load or save.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// The detected (or configured) line ending style.
    #[inline]
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    // -- File I/O -----------------------------------------------------------

    /// Save the buffer to its associated file path.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is set or the write fails.
    pub fn save(&mut self) -> io::Result<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "buffer has no file path"))?;
        self.save_as(&path)
    }

    /// Save the buffer to a specific path, updating the stored path.
    ///
    /// Writes [`serialized`](Self::serialized) verbatim and marks the buffer
    /// unmodified on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_as(&mut self, path: &Path) -> io::Result<()> {
        fs::write(path, self.serialized())?;
        self.path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    // -- Internal -----------------------------------------------------------

    /// The range between two char offsets. Offsets past the end are clamped;
    /// callers pass offsets taken from this buffer's own text.
    pub(crate) fn char_range(&self, start: usize, end: usize) -> Range {
        Range::new(self.char_position(start), self.char_position(end))
    }

    fn char_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        Position::new(line + 1, offset - self.rope.line_to_char(line))
    }

    /// Validate a range and convert it to a char span.
    fn char_span(&self, range: Range) -> Result<(usize, usize), OutOfRange> {
        if !range.is_ordered() {
            return Err(OutOfRange::Range(range));
        }
        let start = self.offset_of(range.start)?;
        let end = self.offset_of(range.end)?;
        Ok((start, end))
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.line_count())
            .field("chars", &self.len_chars())
            .field("modified", &self.modified)
            .field("line_ending", &self.line_ending)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Normalize `\r\n` and lone `\r` to `\n`.
pub(crate) fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\r' {
            result.push('\n');
            // \r\n is one line ending, not two.
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
        } else {
            result.push(ch);
        }
    }

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn pos(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    fn range(a: (usize, usize), b: (usize, usize)) -> Range {
        Range::new(pos(a.0, a.1), pos(b.0, b.1))
    }

    // -- LineEnding ---------------------------------------------------------

    #[test]
    fn line_ending_detect() {
        assert_eq!(LineEnding::detect("hello\nworld\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("hello\r\nworld\r\n"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("hello\rworld\r"), LineEnding::Cr);
        assert_eq!(LineEnding::detect("no newlines"), LineEnding::Lf);
        assert_eq!(LineEnding::detect(""), LineEnding::Lf);
    }

    #[test]
    fn line_ending_detect_first_wins() {
        assert_eq!(LineEnding::detect("a\nb\r\nc"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\r\nb\nc"), LineEnding::CrLf);
    }

    #[test]
    fn line_ending_display() {
        assert_eq!(LineEnding::Lf.to_string(), "LF");
        assert_eq!(LineEnding::CrLf.to_string(), "CRLF");
        assert_eq!(LineEnding::Cr.to_string(), "CR");
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_buffer_is_empty() {
        let buf = Buffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len_chars(), 0);
        assert_eq!(buf.line_count(), 1);
        assert!(!buf.is_modified());
        assert!(buf.path().is_none());
        assert_eq!(buf.position_of(0), Ok(Position::ORIGIN));
    }

    #[test]
    fn from_text_basic() {
        let buf = Buffer::from_text("hello\nworld\n");
        assert_eq!(buf.len_chars(), 12);
        assert_eq!(buf.line_count(), 3);
        assert!(!buf.is_modified());
    }

    #[test]
    fn from_text_normalizes_crlf() {
        let buf = Buffer::from_text("a\r\nb\r\n");
        assert_eq!(buf.full_text(), "a\nb\n");
        assert_eq!(buf.line_ending(), LineEnding::CrLf);
        assert_eq!(buf.serialized(), "a\r\nb\r\n");
    }

    #[test]
    fn lone_cr_is_a_line_break() {
        let buf = Buffer::from_text("a\rb");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.serialized(), "a\rb");
    }

    #[test]
    fn vertical_tab_is_not_a_line_break() {
        let buf = Buffer::from_text("a\u{0B}b");
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_content_len(1), Some(3));
    }

    // -- Line access --------------------------------------------------------

    #[test]
    fn line_is_one_based() {
        let buf = Buffer::from_text("hello\nworld");
        assert!(buf.line(0).is_none());
        assert_eq!(buf.line(1).map(|l| l.to_string()), Some("hello\n".into()));
        assert_eq!(buf.line(2).map(|l| l.to_string()), Some("world".into()));
        assert!(buf.line(3).is_none());
    }

    #[test]
    fn line_content_len_excludes_newline() {
        let buf = Buffer::from_text("hello\n\nab");
        assert_eq!(buf.line_content_len(1), Some(5));
        assert_eq!(buf.line_content_len(2), Some(0));
        assert_eq!(buf.line_content_len(3), Some(2));
        assert_eq!(buf.line_content_len(4), None);
    }

    // -- Coordinate conversion ----------------------------------------------

    #[test]
    fn offset_of_counts_separators() {
        let buf = Buffer::from_text("hello\nworld\n");
        assert_eq!(buf.offset_of(pos(1, 0)), Ok(0));
        assert_eq!(buf.offset_of(pos(1, 5)), Ok(5));
        assert_eq!(buf.offset_of(pos(2, 0)), Ok(6));
        assert_eq!(buf.offset_of(pos(2, 3)), Ok(9));
        assert_eq!(buf.offset_of(pos(3, 0)), Ok(12));
    }

    #[test]
    fn offset_of_rejects_invalid_positions() {
        let buf = Buffer::from_text("hello\nworld\n");
        assert_eq!(buf.offset_of(pos(0, 0)), Err(OutOfRange::Position(pos(0, 0))));
        assert_eq!(buf.offset_of(pos(1, 6)), Err(OutOfRange::Position(pos(1, 6))));
        assert_eq!(buf.offset_of(pos(4, 0)), Err(OutOfRange::Position(pos(4, 0))));
    }

    #[test]
    fn position_of_basic() {
        let buf = Buffer::from_text("hello\nworld\n");
        assert_eq!(buf.position_of(0), Ok(pos(1, 0)));
        assert_eq!(buf.position_of(5), Ok(pos(1, 5)));
        assert_eq!(buf.position_of(6), Ok(pos(2, 0)));
        assert_eq!(buf.position_of(12), Ok(pos(3, 0)));
        assert_eq!(
            buf.position_of(13),
            Err(OutOfRange::Offset { offset: 13, len: 12 })
        );
    }

    #[test]
    fn unicode_columns_are_chars() {
        let buf = Buffer::from_text("café\n日本語");
        assert_eq!(buf.line_content_len(1), Some(4));
        assert_eq!(buf.offset_of(pos(2, 1)), Ok(6));
        assert_eq!(buf.text_of(range((2, 1), (2, 3))).as_deref(), Ok("本語"));
    }

    #[test]
    fn clamp_position() {
        let buf = Buffer::from_text("hello\nhi");
        assert_eq!(buf.clamp_position(pos(1, 2)), pos(1, 2));
        assert_eq!(buf.clamp_position(pos(0, 9)), pos(1, 5));
        assert_eq!(buf.clamp_position(pos(9, 9)), pos(2, 2));
        assert_eq!(Buffer::new().clamp_position(pos(3, 3)), Position::ORIGIN);
    }

    // -- Editing ------------------------------------------------------------

    #[test]
    fn insert_in_middle() {
        let mut buf = Buffer::from_text("held");
        let end = buf.insert(pos(1, 3), "lo wor").unwrap();
        assert_eq!(buf.full_text(), "hello world");
        assert_eq!(end, pos(1, 9));
        assert!(buf.is_modified());
    }

    #[test]
    fn insert_splits_lines() {
        let mut buf = Buffer::from_text("ab");
        let end = buf.insert(pos(1, 1), "x\r\ny\nz").unwrap();
        assert_eq!(buf.full_text(), "ax\ny\nzb");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(end, pos(3, 1));
    }

    #[test]
    fn insert_empty_string_is_noop() {
        let mut buf = Buffer::from_text("abc");
        assert_eq!(buf.insert(pos(1, 1), ""), Ok(pos(1, 1)));
        assert!(!buf.is_modified());
    }

    #[test]
    fn insert_out_of_range() {
        let mut buf = Buffer::from_text("abc");
        assert_eq!(
            buf.insert(pos(1, 4), "x"),
            Err(OutOfRange::Position(pos(1, 4)))
        );
        assert_eq!(buf.full_text(), "abc");
    }

    #[test]
    fn delete_across_lines() {
        let mut buf = Buffer::from_text("hello\nworld\n");
        let removed = buf.delete(range((1, 3), (2, 2))).unwrap();
        assert_eq!(removed, "lo\nwo");
        assert_eq!(buf.full_text(), "helrld\n");
    }

    #[test]
    fn delete_empty_range_is_noop() {
        let mut buf = Buffer::from_text("hello");
        assert_eq!(buf.delete(Range::new(pos(1, 2), pos(1, 2))), Ok(String::new()));
        assert_eq!(buf.full_text(), "hello");
        assert!(!buf.is_modified());
    }

    #[test]
    fn delete_validates_empty_ranges_too() {
        let mut buf = Buffer::from_text("hello");
        let bad = Range::new(pos(2, 0), pos(2, 0));
        assert_eq!(buf.delete(bad), Err(OutOfRange::Position(pos(2, 0))));
    }

    #[test]
    fn delete_rejects_inverted_range() {
        let mut buf = Buffer::from_text("hello");
        let inverted = Range {
            start: pos(1, 4),
            end: pos(1, 1),
        };
        assert_eq!(buf.delete(inverted), Err(OutOfRange::Range(inverted)));
    }

    #[test]
    fn text_of_multi_line() {
        let buf = Buffer::from_text("hello\nworld\n");
        assert_eq!(buf.text_of(range((1, 2), (2, 3))).as_deref(), Ok("llo\nwor"));
        assert_eq!(
            buf.text_of(range((1, 0), (3, 0))).as_deref(),
            Ok("hello\nworld\n")
        );
        assert!(buf.text_of(range((1, 0), (3, 1))).is_err());
    }

    #[test]
    fn replace_all_keeps_line_ending() {
        let mut buf = Buffer::from_text("a\r\nb");
        buf.replace_all("x\ny\nz");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line_ending(), LineEnding::CrLf);
        assert_eq!(buf.serialized(), "x\r\ny\r\nz");
        assert!(buf.is_modified());
    }

    #[test]
    fn load_resets_modified_and_detects() {
        let mut buf = Buffer::from_text("abc");
        buf.insert(pos(1, 0), "x").unwrap();
        buf.load("one\rtwo");
        assert!(!buf.is_modified());
        assert_eq!(buf.line_ending(), LineEnding::Cr);
        assert_eq!(buf.full_text(), "one\ntwo");
    }

    // -- File I/O -----------------------------------------------------------

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.txt");

        let mut buf = Buffer::from_text("hello\nworld\n");
        buf.insert(pos(3, 0), "!").unwrap();
        buf.save_as(&path).unwrap();

        assert!(!buf.is_modified());
        assert_eq!(buf.path(), Some(path.as_path()));

        let loaded = Buffer::from_file(&path).unwrap();
        assert_eq!(loaded.full_text(), "hello\nworld\n!");
        assert!(!loaded.is_modified());
    }

    #[test]
    fn save_keeps_crlf_after_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlf.txt");

        let mut buf = Buffer::from_text("hello\r\nworld\r\n");
        buf.insert(pos(3, 0), "again\n").unwrap();
        buf.save_as(&path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "hello\r\nworld\r\nagain\r\n"
        );
    }

    #[test]
    fn save_no_path_errors() {
        let mut buf = Buffer::from_text("x");
        let err = buf.save().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn from_file_nonexistent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Buffer::from_file(&dir.path().join("missing.txt")).is_err());
    }

    #[test]
    fn buffer_debug_format() {
        let buf = Buffer::from_text("a\nb");
        let dbg = format!("{buf:?}");
        assert!(dbg.contains("lines: 2"));
        assert!(dbg.contains("chars: 3"));
    }

    // -- Properties ---------------------------------------------------------

    fn text_strategy() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[a-cé\n]{0,40}").unwrap()
    }

    proptest! {
        #[test]
        fn offset_position_roundtrip(text in text_strategy()) {
            let buf = Buffer::from_text(&text);
            for offset in 0..=buf.len_chars() {
                let p = buf.position_of(offset).unwrap();
                prop_assert_eq!(buf.offset_of(p), Ok(offset));
            }
            for line in 1..=buf.line_count() {
                for col in 0..=buf.line_content_len(line).unwrap() {
                    let p = pos(line, col);
                    let offset = buf.offset_of(p).unwrap();
                    prop_assert_eq!(buf.position_of(offset), Ok(p));
                }
            }
        }

        #[test]
        fn insert_then_delete_restores(
            text in text_strategy(),
            insert in text_strategy(),
            at in 0usize..64,
        ) {
            let mut buf = Buffer::from_text(&text);
            let before = buf.full_text();
            let p = buf.position_of(at.min(buf.len_chars())).unwrap();
            let end = buf.insert(p, &insert).unwrap();
            prop_assert_eq!(end, p.advanced_by(&insert));
            let removed = buf.delete(Range::new(p, end)).unwrap();
            prop_assert_eq!(removed, insert);
            prop_assert_eq!(buf.full_text(), before);
        }
    }
}

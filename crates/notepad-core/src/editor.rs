//! Editor session — the buffer, its tags, the cursor and the options, kept
//! in step.
//!
//! Every front end (the line shell, a future GUI) talks to the document only
//! through [`Editor`]. Each mutating call updates the text, re-anchors or
//! invalidates the tag overlay, and moves the cursor before it returns, so
//! callers never observe a half-applied edit.
//!
//! # Invalidation rules
//!
//! | Operation         | Tags                               | Cursor              |
//! |-------------------|------------------------------------|---------------------|
//! | `load_content`    | cleared                            | reset to `1.0`      |
//! | `insert`          | shifted past the insertion         | end of inserted text|
//! | `delete`          | trimmed, emptied ranges dropped    | start of the range  |
//! | `replace`         | cleared (non-empty needle)         | clamped             |
//! | `search`          | `found` replaced by the new matches| unchanged           |
//! | formatting calls  | the named tag only                 | unchanged           |

use std::path::Path;

use tracing::{debug, info, warn};

use crate::buffer::Buffer;
use crate::cursor::Cursor;
use crate::error::{EditorError, EditorResult, OutOfRange};
use crate::options::{self, Options};
use crate::position::{Position, Range};
use crate::replace;
use crate::search;
use crate::tag::{self, TagOverlay, TagRanges, Toggle};

/// Window title when no file is associated.
pub const APP_NAME: &str = "Notepad";

/// One open document.
#[derive(Debug, Default)]
pub struct Editor {
    buffer: Buffer,
    tags: TagOverlay,
    cursor: Cursor,
    options: Options,
}

impl Editor {
    /// An empty, untitled document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `path` into a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Io`] if the file cannot be read as UTF-8.
    pub fn from_file(path: &Path) -> EditorResult<Self> {
        let mut editor = Self::new();
        editor.open(path)?;
        Ok(editor)
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[inline]
    #[must_use]
    pub const fn tags(&self) -> &TagOverlay {
        &self.tags
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor.current()
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// True if there are changes since the last load or save.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    /// `"Notepad - <path>"`, or just `"Notepad"` for an untitled document.
    #[must_use]
    pub fn title(&self) -> String {
        self.buffer.path().map_or_else(
            || APP_NAME.to_string(),
            |path| format!("{APP_NAME} - {}", path.display()),
        )
    }

    /// The status bar text for the current cursor.
    #[must_use]
    pub fn cursor_text(&self) -> String {
        self.cursor.status_text()
    }

    // -- Content ------------------------------------------------------------

    /// Replace the whole document. Tags are dropped, the cursor goes back to
    /// `1.0`, and the document counts as unmodified.
    pub fn load_content(&mut self, text: &str) {
        self.buffer.load(text);
        self.tags.clear();
        self.cursor.reset();
        debug!(
            lines = self.buffer.line_count(),
            line_ending = %self.buffer.line_ending(),
            "content loaded"
        );
    }

    /// The document as it should be written to disk.
    #[must_use]
    pub fn serialize_content(&self) -> String {
        self.buffer.serialized()
    }

    // -- File menu ----------------------------------------------------------

    /// Read `path` and make it the current document.
    ///
    /// On failure the current document is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Io`] if the file cannot be read as UTF-8.
    pub fn open(&mut self, path: &Path) -> EditorResult<()> {
        self.buffer = Buffer::from_file(path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "open failed");
        })?;
        self.tags.clear();
        self.cursor.reset();
        info!(
            path = %path.display(),
            lines = self.buffer.line_count(),
            line_ending = %self.buffer.line_ending(),
            "opened"
        );
        Ok(())
    }

    /// Write the document to its current path.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoPath`] for an untitled document and
    /// [`EditorError::Io`] if the write fails.
    pub fn save(&mut self) -> EditorResult<()> {
        if self.buffer.path().is_none() {
            return Err(EditorError::NoPath);
        }
        self.buffer.save()?;
        info!(title = %self.title(), "saved");
        Ok(())
    }

    /// Write the document to `path` and make that its path.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Io`] if the write fails.
    pub fn save_as(&mut self, path: &Path) -> EditorResult<()> {
        self.buffer.save_as(path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "save failed");
        })?;
        info!(path = %path.display(), "saved");
        Ok(())
    }

    /// Whether the session may close without losing work.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Modified`] while there are unsaved changes.
    pub fn check_quit(&self) -> EditorResult<()> {
        if self.buffer.is_modified() {
            Err(EditorError::Modified)
        } else {
            Ok(())
        }
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `text` at `pos`. Tags shift to follow the text and the cursor
    /// lands after the inserted text, whose end is returned.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `pos` is not in the buffer.
    pub fn insert(&mut self, pos: Position, text: &str) -> EditorResult<Position> {
        let end = self.buffer.insert(pos, text)?;
        self.tags.on_insert(pos, end);
        self.cursor.on_edit(end);
        debug!(%pos, %end, "insert");
        Ok(end)
    }

    /// Delete `range` and return the removed text. Tags are trimmed and the
    /// cursor moves to where the range started.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if the range is inverted or leaves the buffer.
    pub fn delete(&mut self, range: Range) -> EditorResult<String> {
        let removed = self.buffer.delete(range)?;
        self.tags.on_delete(range);
        self.cursor.on_edit(range.start);
        debug!(%range, chars = removed.chars().count(), "delete");
        Ok(removed)
    }

    /// Place the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `pos` is not in the buffer.
    pub fn move_cursor(&mut self, pos: Position) -> EditorResult<()> {
        if !self.buffer.is_valid(pos) {
            return Err(OutOfRange::Position(pos).into());
        }
        self.cursor.on_move(pos);
        Ok(())
    }

    // -- Formatting ---------------------------------------------------------

    /// Tag `range` with `name`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if the range is inverted or leaves the buffer.
    pub fn apply_formatting(&mut self, name: &str, range: Range) -> EditorResult<()> {
        self.check_range(range)?;
        self.tags.add_tag(name, range);
        Ok(())
    }

    /// Remove `name` from `range`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if the range is inverted or leaves the buffer.
    pub fn remove_formatting(&mut self, name: &str, range: Range) -> EditorResult<()> {
        self.check_range(range)?;
        self.tags.remove_tag(name, range);
        Ok(())
    }

    /// Flip `name` over `range` as a whole; see [`TagOverlay::toggle_tag`].
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if the range is inverted or leaves the buffer.
    pub fn toggle_formatting(&mut self, name: &str, range: Range) -> EditorResult<Toggle> {
        self.check_range(range)?;
        let outcome = self.tags.toggle_tag(name, range);
        debug!(tag = name, %range, ?outcome, "toggle");
        Ok(outcome)
    }

    /// Ranges currently carrying `name`, in document order.
    #[must_use]
    pub fn ranges_of(&self, name: &str) -> TagRanges<'_> {
        self.tags.ranges_of(name)
    }

    /// Names of the tags covering `pos`.
    #[must_use]
    pub fn tags_at(&self, pos: Position) -> Vec<&str> {
        self.tags.tags_at(pos)
    }

    fn check_range(&self, range: Range) -> Result<(), OutOfRange> {
        if range.is_ordered() && self.buffer.is_valid(range.start) && self.buffer.is_valid(range.end)
        {
            Ok(())
        } else {
            Err(OutOfRange::Range(range))
        }
    }

    // -- Search & replace ---------------------------------------------------

    /// Highlight every occurrence of `needle` with the `found` tag and return
    /// how many there are. Earlier highlights are replaced.
    ///
    /// An empty needle changes nothing and returns 0. With `hlsearch` off the
    /// matches are counted but not tagged.
    pub fn search(&mut self, needle: &str) -> usize {
        if needle.is_empty() {
            return 0;
        }

        let matches = search::find_all(&self.buffer, needle);
        self.tags.clear_tag(tag::FOUND);
        if self.options.hlsearch {
            for &range in &matches {
                self.tags.add_tag(tag::FOUND, range);
            }
        }
        debug!(needle, count = matches.len(), "search");
        matches.len()
    }

    /// Move the cursor to the end of the next occurrence of `needle` after
    /// the cursor, wrapping around, and return the match.
    pub fn find_next(&mut self, needle: &str) -> Option<Range> {
        let found = search::find_next(&self.buffer, needle, self.cursor.current())?;
        self.cursor.on_move(found.end);
        Some(found)
    }

    /// Replace every occurrence of `needle` with `replacement` and return the
    /// count.
    ///
    /// A non-empty needle rewrites the whole document, so every tag is
    /// dropped even when nothing matched. An empty needle does nothing.
    pub fn replace(&mut self, needle: &str, replacement: &str) -> usize {
        if needle.is_empty() {
            return 0;
        }

        let count = replace::replace_all(&mut self.buffer, needle, replacement);
        self.tags.clear();
        self.cursor.clamp(&self.buffer);
        info!(needle, replacement, count, "replace");
        count
    }

    // -- Options ------------------------------------------------------------

    /// Apply a `:set` argument string. Returns the lines to show the user.
    ///
    /// Directives are applied left to right to a copy of the options, which
    /// replaces the current ones only if every directive succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Option`] for unknown or mistyped options. The
    /// options are then unchanged.
    pub fn set_option(&mut self, args: &str) -> EditorResult<Vec<String>> {
        let mut staged = self.options.clone();
        let mut output = Vec::new();
        for directive in options::parse_set(args) {
            if let Some(line) = staged.apply(&directive)? {
                output.push(line);
            }
        }
        self.options = staged;
        if !self.options.hlsearch {
            self.tags.clear_tag(tag::FOUND);
        }
        Ok(output)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

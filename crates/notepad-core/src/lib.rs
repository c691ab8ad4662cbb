//! # notepad-core — Document model for the notepad editor
//!
//! This crate holds everything below the user interface:
//!
//! - **[`position`]** — `Position` (1-based line, 0-based column) and half-open `Range`
//! - **[`buffer`]** — `Buffer` wrapping a rope with editing, line endings, and file I/O
//! - **[`tag`]** — `TagOverlay`, named range sets for formatting and search highlights
//! - **[`search`]** / **[`replace`]** — literal find and global substitution
//! - **[`cursor`]** — the insertion point and its status-bar text
//! - **[`options`]** — the `:set` layer (font, font size, wrap, hlsearch)
//! - **[`command`]** — command-line parsing for the host shell
//! - **[`editor`]** — `Editor`, the session that keeps all of the above in step
//!
//! Front ends should only need [`Editor`] and [`command::parse`].

pub mod buffer;
pub mod command;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod options;
pub mod position;
pub mod replace;
pub mod search;
pub mod tag;

pub use editor::Editor;
pub use error::{EditorError, EditorResult, OutOfRange};
pub use position::{Position, Range};

//! Error types for the document model and the editor session.
//!
//! Out-of-range coordinates are always a caller bug, never something the user
//! can fix, but they are still returned as values so the host shell can
//! report them and keep the session alive. I/O errors come from the file
//! collaborator and pass through unchanged.

use std::io;

use thiserror::Error;

use crate::position::{Position, Range};

/// A coordinate that does not address the current buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OutOfRange {
    #[error("position {0} is outside the buffer")]
    Position(Position),

    #[error("offset {offset} is outside the buffer (length {len})")]
    Offset { offset: usize, len: usize },

    #[error("range {0} is inverted or outside the buffer")]
    Range(Range),
}

/// Editor session error.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid option: {0}")]
    Option(String),

    #[error("No file name")]
    NoPath,

    #[error("Unsaved changes (use :q! to discard)")]
    Modified,
}

/// Editor result.
pub type EditorResult<T> = Result<T, EditorError>;

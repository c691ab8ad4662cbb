//! Search — literal substring matching over the whole buffer.
//!
//! Matching is case-sensitive and literal: no regex, no folding. A needle may
//! contain line breaks, in which case matches span lines. Needle line breaks
//! are normalized the same way the buffer normalizes its text, so `"a\r\nb"`
//! finds `a` at the end of one line followed by `b` at the start of the next.
//!
//! # Scanning discipline
//!
//! [`find_all`] scans left to right and resumes right after each match, so
//! matches never overlap: `"aa"` occurs twice in `"aaaa"`, not three times.
//! This is the same discipline [`replace`](crate::replace) uses, which keeps
//! highlighted matches and replaced occurrences in agreement.
//!
//! Highlighting the matches (the `found` tag) is the editor's job; this
//! module only produces ranges.

use crate::buffer::{normalize_line_endings, Buffer};
use crate::position::{Position, Range};

/// Every non-overlapping occurrence of `needle`, in document order.
///
/// An empty needle matches nothing.
#[must_use]
pub fn find_all(buf: &Buffer, needle: &str) -> Vec<Range> {
    if needle.is_empty() {
        return Vec::new();
    }

    let needle = normalize_line_endings(needle);
    let needle_chars = needle.chars().count();
    let text = buf.full_text();

    // Walk the text once, carrying the char offset along with the byte
    // offset so each match converts in time proportional to the gap.
    let mut matches = Vec::new();
    let mut seen_bytes = 0;
    let mut seen_chars = 0;
    for (byte_idx, _) in text.match_indices(needle.as_str()) {
        seen_chars += text[seen_bytes..byte_idx].chars().count();
        seen_bytes = byte_idx;
        matches.push(buf.char_range(seen_chars, seen_chars + needle_chars));
    }

    matches
}

/// The first occurrence of `needle` starting at or after `from`, wrapping
/// around to the start of the buffer when nothing follows `from`.
///
/// `from` is clamped into the buffer first. Returns `None` when the needle is
/// empty or does not occur at all.
#[must_use]
pub fn find_next(buf: &Buffer, needle: &str, from: Position) -> Option<Range> {
    if needle.is_empty() {
        return None;
    }

    let needle = normalize_line_endings(needle);
    let needle_chars = needle.chars().count();
    let text = buf.full_text();

    let from_char = buf.offset_of(buf.clamp_position(from)).unwrap_or(0);
    let from_byte = buf.rope().char_to_byte(from_char);

    let byte_idx = text[from_byte..]
        .find(needle.as_str())
        .map(|idx| from_byte + idx)
        .or_else(|| text.find(needle.as_str()))?;

    let start = buf.rope().byte_to_char(byte_idx);
    Some(buf.char_range(start, start + needle_chars))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

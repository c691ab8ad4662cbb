//! Replace — global literal substitution over the whole document.
//!
//! The replacement pass reads [`Buffer::full_text`], substitutes every
//! non-overlapping occurrence left to right (the same scan [`search`] uses),
//! and writes the result back with [`Buffer::replace_all`].
//!
//! Because the content is rewritten wholesale, every stored position is
//! meaningless afterwards. The editor clears the tag overlay after calling
//! [`replace_all`]; highlights that should survive have to be re-derived,
//! e.g. by searching again.
//!
//! [`search`]: crate::search

use crate::buffer::{normalize_line_endings, Buffer};

/// Replace every occurrence of `needle` with `replacement` and return how
/// many were replaced.
///
/// An empty needle is a no-op returning 0 and leaves the buffer untouched.
/// Any other needle rewrites the buffer, even when it does not occur. An
/// empty replacement deletes the occurrences.
pub fn replace_all(buf: &mut Buffer, needle: &str, replacement: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }

    let needle = normalize_line_endings(needle);
    let text = buf.full_text();

    let mut result = String::with_capacity(text.len());
    let mut count = 0;
    let mut last = 0;
    for (idx, matched) in text.match_indices(needle.as_str()) {
        result.push_str(&text[last..idx]);
        result.push_str(replacement);
        last = idx + matched.len();
        count += 1;
    }
    result.push_str(&text[last..]);

    buf.replace_all(&result);
    count
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

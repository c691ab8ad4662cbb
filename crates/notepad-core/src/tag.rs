//! Tag overlay — named sets of ranges laid over the buffer.
//!
//! Formatting (`bold`, `italic`, `underline`) and search highlighting
//! (`found`) are tags: a name mapped to the ranges that currently carry it.
//! The overlay never touches text. It is pure range-set algebra over
//! positions that the caller has already validated against the buffer.
//!
//! # Invariants
//!
//! For every tag, the stored ranges are non-empty, sorted by start, pairwise
//! disjoint and never touching: [`add_tag`](TagOverlay::add_tag) merges with
//! neighbours, [`remove_tag`](TagOverlay::remove_tag) splits them. That keeps
//! every query a binary search and makes "is this whole range covered" a
//! single-range containment check.
//!
//! Different tags are independent and may overlap freely.
//!
//! # Re-anchoring
//!
//! The buffer does not know about tags. After every insert or delete the
//! editor calls [`on_insert`](TagOverlay::on_insert) or
//! [`on_delete`](TagOverlay::on_delete) so stored endpoints follow the text,
//! in the same way editor markers are adjusted after an edit: endpoints at or
//! after an insertion point move forward, endpoints inside a deleted span
//! collapse onto its start.

use std::collections::BTreeMap;
use std::iter::FusedIterator;
use std::slice;

use crate::position::{Position, Range};

/// Bold formatting.
pub const BOLD: &str = "bold";
/// Italic formatting.
pub const ITALIC: &str = "italic";
/// Underline formatting.
pub const UNDERLINE: &str = "underline";
/// Search-match highlight.
pub const FOUND: &str = "found";

/// What [`TagOverlay::toggle_tag`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The range was not fully covered; the tag now covers all of it.
    Added,
    /// The range was fully covered; the tag was removed from it.
    Removed,
    /// The range was empty. Nothing changed.
    Skipped,
}

/// All tags for the current buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOverlay {
    tags: BTreeMap<String, Vec<Range>>,
}

impl TagOverlay {
    /// An overlay with no tags.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tags: BTreeMap::new(),
        }
    }

    // -- Mutation -----------------------------------------------------------

    /// Tag `range` with `name`. Idempotent; overlapping or touching ranges of
    /// the same tag are merged. Unknown names create a new tag.
    pub fn add_tag(&mut self, name: &str, range: Range) {
        let set = self.tags.entry(name.to_string()).or_default();
        if range.is_empty() {
            return;
        }

        // Stored ranges that overlap or touch `range` form one contiguous run.
        let first = set.partition_point(|r| r.end < range.start);
        let last = set.partition_point(|r| r.start <= range.end);

        let mut merged = range;
        if first < last {
            merged.start = merged.start.min(set[first].start);
            merged.end = merged.end.max(set[last - 1].end);
        }
        set.splice(first..last, [merged]);
    }

    /// Clear exactly the overlap between `range` and `name`. Stored ranges
    /// that stick out on either side keep their remainder. Idempotent.
    pub fn remove_tag(&mut self, name: &str, range: Range) {
        let Some(set) = self.tags.get_mut(name) else {
            return;
        };
        if range.is_empty() {
            return;
        }

        let first = set.partition_point(|r| r.end <= range.start);
        let last = set.partition_point(|r| r.start < range.end);
        if first >= last {
            return;
        }

        let head = set[first];
        let tail = set[last - 1];
        let mut remainder = Vec::with_capacity(2);
        if head.start < range.start {
            remainder.push(Range::new(head.start, range.start));
        }
        if range.end < tail.end {
            remainder.push(Range::new(range.end, tail.end));
        }
        set.splice(first..last, remainder);
    }

    /// The formatting toggle.
    ///
    /// The whole range is evaluated: if every position in `range` already
    /// carries `name`, the tag is removed from `range`; otherwise `range` is
    /// tagged in full. A selection that is only partly bold therefore becomes
    /// entirely bold rather than flipping depending on its first character.
    pub fn toggle_tag(&mut self, name: &str, range: Range) -> Toggle {
        if range.is_empty() {
            return Toggle::Skipped;
        }
        if self.covers(name, range) {
            self.remove_tag(name, range);
            Toggle::Removed
        } else {
            self.add_tag(name, range);
            Toggle::Added
        }
    }

    /// Drop every range of one tag.
    pub fn clear_tag(&mut self, name: &str) {
        if let Some(set) = self.tags.get_mut(name) {
            set.clear();
        }
    }

    /// Drop every tag. Called whenever the buffer is replaced wholesale.
    pub fn clear(&mut self) {
        self.tags.clear();
    }

    // -- Queries ------------------------------------------------------------

    /// True if some range of `name` contains `pos` (half-open).
    #[must_use]
    pub fn has_tag(&self, name: &str, pos: Position) -> bool {
        self.tags.get(name).is_some_and(|set| {
            let idx = set.partition_point(|r| r.end <= pos);
            set.get(idx).is_some_and(|r| r.contains(pos))
        })
    }

    /// True if every position in `range` carries `name`. Vacuously true for
    /// an empty range.
    #[must_use]
    pub fn covers(&self, name: &str, range: Range) -> bool {
        if range.is_empty() {
            return true;
        }
        // Stored ranges never touch, so full coverage means one range
        // encloses the whole of `range`.
        self.tags.get(name).is_some_and(|set| {
            let idx = set.partition_point(|r| r.end <= range.start);
            set.get(idx).is_some_and(|r| r.encloses(range))
        })
    }

    /// The ranges carrying `name`, in document order. The iterator is lazy
    /// and can be cloned to restart it.
    #[must_use]
    pub fn ranges_of(&self, name: &str) -> TagRanges<'_> {
        let set = match self.tags.get(name) {
            Some(set) => set.as_slice(),
            None => &[],
        };
        TagRanges { inner: set.iter() }
    }

    /// Every tag name covering `pos`, in name order.
    #[must_use]
    pub fn tags_at(&self, pos: Position) -> Vec<&str> {
        self.tags
            .keys()
            .filter(|name| self.has_tag(name, pos))
            .map(String::as_str)
            .collect()
    }

    /// Names of all tags that currently carry at least one range.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(name, _)| name.as_str())
    }

    /// True when no tag carries any range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.values().all(Vec::is_empty)
    }

    // -- Re-anchoring -------------------------------------------------------

    /// Follow an insertion that turned `at` into the span `[at, end)`.
    ///
    /// The shift is strictly monotone, so order and disjointness survive
    /// without re-normalizing.
    pub fn on_insert(&mut self, at: Position, end: Position) {
        if at == end {
            return;
        }
        for set in self.tags.values_mut() {
            for r in set.iter_mut() {
                r.start = shift_for_insert(r.start, at, end);
                r.end = shift_for_insert(r.end, at, end);
            }
        }
    }

    /// Follow a deletion of `deleted`.
    ///
    /// Ranges inside the deleted span vanish; ranges on both sides of it may
    /// end up touching and are merged.
    pub fn on_delete(&mut self, deleted: Range) {
        if deleted.is_empty() {
            return;
        }
        for set in self.tags.values_mut() {
            let shifted = set.iter().map(|r| Range {
                start: shift_for_delete(r.start, deleted),
                end: shift_for_delete(r.end, deleted),
            });

            let mut normalized: Vec<Range> = Vec::with_capacity(set.len());
            for r in shifted.filter(|r| !r.is_empty()) {
                match normalized.last_mut() {
                    Some(prev) if r.start <= prev.end => prev.end = prev.end.max(r.end),
                    _ => normalized.push(r),
                }
            }
            *set = normalized;
        }
    }
}

// ---------------------------------------------------------------------------
// TagRanges
// ---------------------------------------------------------------------------

/// Iterator over one tag's ranges. See [`TagOverlay::ranges_of`].
#[derive(Debug, Clone)]
pub struct TagRanges<'a> {
    inner: slice::Iter<'a, Range>,
}

impl Iterator for TagRanges<'_> {
    type Item = Range;

    fn next(&mut self) -> Option<Range> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for TagRanges<'_> {
    fn next_back(&mut self) -> Option<Range> {
        self.inner.next_back().copied()
    }
}

impl ExactSizeIterator for TagRanges<'_> {}

impl FusedIterator for TagRanges<'_> {}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Where `p` lands after `[at, end)` was inserted at `at`.
fn shift_for_insert(p: Position, at: Position, end: Position) -> Position {
    if p < at {
        p
    } else if p.line == at.line {
        Position::new(end.line, end.col + (p.col - at.col))
    } else {
        Position::new(p.line + (end.line - at.line), p.col)
    }
}

/// Where `p` lands after `deleted` was removed.
fn shift_for_delete(p: Position, deleted: Range) -> Position {
    let Range { start, end } = deleted;
    if p <= start {
        p
    } else if p <= end {
        start
    } else if p.line == end.line {
        Position::new(start.line, start.col + (p.col - end.col))
    } else {
        Position::new(p.line - (end.line - start.line), p.col)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

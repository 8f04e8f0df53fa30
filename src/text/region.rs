//! Inclusive selections.

use crate::text::cursor::Cursor;
use crate::text::storage::TextStorage;
use std::borrow::Cow;

/// A selected span of a document, inclusive on both ends, with
/// `start <= end` in document order.
///
/// An end column one past the last rune of a line addresses that line's
/// delimiter; a region spanning several lines includes the delimiters between
/// them. Regions belong to the editing session, not to the storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    start: Cursor,
    end: Cursor,
}

impl Region {
    /// Region between two cursors, in whichever order they are given.
    #[must_use]
    pub fn new(a: Cursor, b: Cursor) -> Self {
        debug_assert_eq!(a.buffer(), b.buffer(), "region endpoints in different buffers");
        if a.line_col() <= b.line_col() {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Region covering a single position.
    #[must_use]
    pub fn at(cursor: Cursor) -> Self {
        Self {
            start: cursor,
            end: cursor,
        }
    }

    #[must_use]
    pub fn start(&self) -> Cursor {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Cursor {
        self.end
    }

    /// Whether `(line, col)` lies inside the region.
    #[must_use]
    pub fn contains(&self, line: usize, col: usize) -> bool {
        (self.start.line_col()..=self.end.line_col()).contains(&(line, col))
    }

    /// Whether the region spans more than one line.
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        self.start.line() != self.end.line()
    }

    /// Selected text.
    #[must_use]
    pub fn text<'a>(&self, storage: &'a TextStorage) -> Cow<'a, str> {
        let (start, end) = self.clamped(storage);
        storage.slice(start.0, start.1, end.0, end.1)
    }

    /// Delete the selected text and return the cursor where it began.
    pub fn remove_from(&self, storage: &mut TextStorage) -> Cursor {
        let (start, end) = self.clamped(storage);
        storage.remove(start.0, start.1, end.0, end.1);
        self.start.set_line_col(storage, start.0, start.1)
    }

    fn clamped(&self, storage: &TextStorage) -> ((usize, usize), (usize, usize)) {
        let start = storage.clamp_line_col(self.start.line(), self.start.col());
        let end = storage.clamp_line_col(self.end.line(), self.end.col());
        (start, end)
    }
}

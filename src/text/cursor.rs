//! Cursor navigation over a [`TextStorage`].
//!
//! A [`Cursor`] is a plain value: it remembers which storage it belongs to by
//! [`BufferId`] and takes the storage as an argument for every movement, so the
//! storage can be edited while cursors exist. Each movement re-clamps the
//! cursor first, which repairs a cursor left stale by an edit.
//!
//! # Examples
//!
//! ```
//! use qedit_core::{Cursor, TextStorage};
//!
//! let text = TextStorage::new("a long line\nshort\nanother long line");
//! let cursor = Cursor::new(&text).set_line_col(&text, 0, 8);
//!
//! // Passing through a short line keeps the remembered column.
//! let cursor = cursor.down(&text);
//! assert_eq!(cursor.line_col(), (1, 5));
//! let cursor = cursor.down(&text);
//! assert_eq!(cursor.line_col(), (2, 8));
//! ```

use crate::text::storage::{BufferId, TextStorage};

/// Rune classification used by word motions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    /// Letters, digits and underscore.
    Word,
    Symbol,
}

impl CharClass {
    /// Classify a rune.
    #[must_use]
    pub fn of(ch: char) -> Self {
        if ch.is_whitespace() {
            Self::Whitespace
        } else if ch == '_' || ch.is_alphanumeric() {
            Self::Word
        } else {
            Self::Symbol
        }
    }
}

/// A `(line, col)` position bound to one [`TextStorage`].
///
/// Movements are pure: they return a new cursor. Horizontal movements and
/// [`set_line_col`](Self::set_line_col) update the sticky column; vertical
/// movements aim for it, so moving up and down through short lines returns to
/// the remembered column once a long enough line is reached.
#[derive(Clone, Copy, Debug)]
pub struct Cursor {
    buffer: BufferId,
    line: usize,
    col: usize,
    sticky_col: usize,
}

impl Cursor {
    /// Cursor at the start of `text`.
    #[must_use]
    pub fn new(text: &TextStorage) -> Self {
        Self {
            buffer: text.id(),
            line: 0,
            col: 0,
            sticky_col: 0,
        }
    }

    /// Cursor at a clamped position in `text`.
    #[must_use]
    pub fn at(text: &TextStorage, line: usize, col: usize) -> Self {
        Self::new(text).set_line_col(text, line, col)
    }

    /// The storage this cursor belongs to.
    #[must_use]
    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    #[must_use]
    pub fn line_col(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn col(&self) -> usize {
        self.col
    }

    /// Column that vertical movement aims for.
    #[must_use]
    pub fn sticky_col(&self) -> usize {
        self.sticky_col
    }

    /// Move to `(line, col)`, clamped to the storage.
    #[must_use]
    pub fn set_line_col(self, text: &TextStorage, line: usize, col: usize) -> Self {
        let c = self.bind(text);
        let (line, col) = text.clamp_line_col(line, col);
        c.moved_to(line, col)
    }

    /// Re-clamp against `text` without moving otherwise.
    #[must_use]
    pub fn clamped(self, text: &TextStorage) -> Self {
        self.bind(text)
    }

    /// One rune left; from column 0 wraps to the end of the previous line.
    #[must_use]
    pub fn left(self, text: &TextStorage) -> Self {
        let c = self.bind(text);
        if c.col == 0 && c.line > 0 {
            c.moved_to(c.line - 1, text.runes_in_line(c.line - 1))
        } else {
            c.moved_to(c.line, c.col.saturating_sub(1))
        }
    }

    /// One rune right; from the end of a line wraps to the next line.
    #[must_use]
    pub fn right(self, text: &TextStorage) -> Self {
        let c = self.bind(text);
        if c.col >= text.runes_in_line(c.line) && c.line + 1 < text.lines() {
            c.moved_to(c.line + 1, 0)
        } else {
            let (line, col) = text.clamp_line_col(c.line, c.col + 1);
            c.moved_to(line, col)
        }
    }

    /// One line up, aiming for the sticky column. On the first line, moves to
    /// the start of the document.
    #[must_use]
    pub fn up(self, text: &TextStorage) -> Self {
        let c = self.bind(text);
        if c.line == 0 {
            c.moved_to(0, 0)
        } else {
            let (line, col) = text.clamp_line_col(c.line - 1, c.sticky_col);
            Self { line, col, ..c }
        }
    }

    /// One line down, aiming for the sticky column. On the last line, moves to
    /// the end of the document.
    #[must_use]
    pub fn down(self, text: &TextStorage) -> Self {
        let c = self.bind(text);
        if c.line + 1 >= text.lines() {
            c.moved_to(c.line, text.runes_in_line(c.line))
        } else {
            let (line, col) = text.clamp_line_col(c.line + 1, c.sticky_col);
            Self { line, col, ..c }
        }
    }

    /// Start of the current line.
    #[must_use]
    pub fn line_start(self, text: &TextStorage) -> Self {
        let c = self.bind(text);
        c.moved_to(c.line, 0)
    }

    /// End of the current line, before the delimiter.
    #[must_use]
    pub fn line_end(self, text: &TextStorage) -> Self {
        let c = self.bind(text);
        c.moved_to(c.line, text.runes_in_line(c.line))
    }

    /// Skip whitespace, then move past the run of same-class runes that follows.
    #[must_use]
    pub fn next_word_boundary_end(self, text: &TextStorage) -> Self {
        let c = self.bind(text);
        let mut idx = text.line_col_to_char(c.line, c.col);
        let mut chars = text.chars_at(idx).peekable();

        while chars
            .next_if(|&ch| CharClass::of(ch) == CharClass::Whitespace)
            .is_some()
        {
            idx += 1;
        }
        if let Some(&first) = chars.peek() {
            let class = CharClass::of(first);
            while chars.next_if(|&ch| CharClass::of(ch) == class).is_some() {
                idx += 1;
            }
        }

        c.moved_to_char(text, idx)
    }

    /// Skip whitespace backwards, then move to the start of the run of
    /// same-class runes before the cursor.
    #[must_use]
    pub fn prev_word_boundary_start(self, text: &TextStorage) -> Self {
        let c = self.bind(text);
        let mut idx = text.line_col_to_char(c.line, c.col);
        let mut chars = text.chars_at(idx);
        let mut run: Option<CharClass> = None;

        while let Some(ch) = chars.prev() {
            let class = CharClass::of(ch);
            match run {
                None if class == CharClass::Whitespace => {}
                None => run = Some(class),
                Some(current) if current == class => {}
                Some(_) => break,
            }
            idx -= 1;
        }

        c.moved_to_char(text, idx)
    }

    fn bind(self, text: &TextStorage) -> Self {
        debug_assert_eq!(
            self.buffer,
            text.id(),
            "cursor used with a buffer it does not belong to"
        );
        let (line, col) = text.clamp_line_col(self.line, self.col);
        Self { line, col, ..self }
    }

    fn moved_to(self, line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            sticky_col: col,
            ..self
        }
    }

    fn moved_to_char(self, text: &TextStorage, char_idx: usize) -> Self {
        let (line, col) = text.char_to_line_col(char_idx);
        let (line, col) = text.clamp_line_col(line, col);
        self.moved_to(line, col)
    }
}

impl PartialEq for Cursor {
    /// Same storage and same coordinates; the sticky column is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.buffer == other.buffer && self.line == other.line && self.col == other.col
    }
}

impl Eq for Cursor {}

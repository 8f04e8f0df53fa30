//! Editing session glue: one document, its highlighter and the cursors that
//! should follow edits.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use qedit_core::highlight::{languages, Colorscheme, Syntax};
//! use qedit_core::{Cursor, Document, TextStorage};
//!
//! let language = Arc::new(languages::go().unwrap());
//! let mut doc = Document::new(TextStorage::new("x\n"), language, Arc::new(Colorscheme::default_dark()));
//!
//! let caret = doc.anchor(Cursor::at(doc.text(), 0, 1));
//! doc.insert(0, 0, "if ");
//! assert_eq!(doc.cursor(caret).unwrap().line_col(), (0, 4));
//!
//! doc.refresh(0, 1);
//! assert_eq!(doc.line_matches(0)[0].syntax, Syntax::Keyword);
//! ```

use crate::error::Result;
use crate::highlight::{Colorscheme, Highlighter, Language, Match, SpanMatcher};
use crate::text::{Cursor, TextStorage};
use std::io;
use std::sync::Arc;

/// Handle to a cursor registered with [`Document::anchor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnchorId(usize);

/// A document being edited.
///
/// Edits go through the document so that the highlight cache and anchored
/// cursors stay consistent with the text.
#[derive(Debug)]
pub struct Document {
    text: TextStorage,
    highlighter: Highlighter,
    anchors: Vec<Option<Cursor>>,
    modified: bool,
}

impl Document {
    #[must_use]
    pub fn new(text: TextStorage, language: Arc<Language>, colorscheme: Arc<Colorscheme>) -> Self {
        let highlighter = Highlighter::new(&text, language, colorscheme);
        Self {
            text,
            highlighter,
            anchors: Vec::new(),
            modified: false,
        }
    }

    /// Install a matcher for multi-line highlight rules.
    #[must_use]
    pub fn with_span_matcher(mut self, matcher: impl SpanMatcher + 'static) -> Self {
        self.highlighter.set_span_matcher(matcher);
        self
    }

    /// Load a document from a reader.
    pub fn from_reader<R: io::Read>(
        reader: R,
        language: Arc<Language>,
        colorscheme: Arc<Colorscheme>,
    ) -> Result<Self> {
        Ok(Self::new(TextStorage::from_reader(reader)?, language, colorscheme))
    }

    #[must_use]
    pub fn text(&self) -> &TextStorage {
        &self.text
    }

    #[must_use]
    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn highlighter_mut(&mut self) -> &mut Highlighter {
        &mut self.highlighter
    }

    /// Insert `s` before `(line, col)` and return a cursor just after it.
    ///
    /// # Panics
    ///
    /// Panics if `line` is out of range.
    pub fn insert(&mut self, line: usize, col: usize, s: &str) -> Cursor {
        let at = self.text.line_col_to_char(line, col);
        let inserted = s.chars().count();
        let before = self.anchor_chars();
        let lines_before = self.text.lines();

        self.text.insert(line, col, s);

        self.restore_anchors(before, |pos| if at <= pos { pos + inserted } else { pos });
        self.after_edit(line, lines_before);
        self.modified |= inserted > 0;
        tracing::trace!(line, col, chars = inserted, lines = self.text.lines(), "document insert");

        let (line, col) = self.text.char_to_line_col(at + inserted);
        Cursor::at(&self.text, line, col)
    }

    /// Delete `(start_line, start_col)` through `(end_line, end_col)` inclusive
    /// and return a cursor at the start of the removed text. Both ends are
    /// clamped to the document.
    pub fn remove(
        &mut self,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Cursor {
        let (start_line, start_col) = self.text.clamp_line_col(start_line, start_col);
        let (end_line, end_col) = self.text.clamp_line_col(end_line, end_col);
        let start = self.text.line_col_to_char(start_line, start_col);
        let chars_before = self.text.len_chars();
        let before = self.anchor_chars();
        let lines_before = self.text.lines();

        self.text.remove(start_line, start_col, end_line, end_col);

        let removed = chars_before - self.text.len_chars();
        let end = start + removed;
        self.restore_anchors(before, |pos| {
            if pos >= end {
                pos - removed
            } else if pos > start {
                start
            } else {
                pos
            }
        });
        self.after_edit(start_line, lines_before);
        self.modified |= removed > 0;
        tracing::trace!(start, end, lines = self.text.lines(), "document remove");

        Cursor::at(&self.text, start_line, start_col)
    }

    /// Register a cursor that follows subsequent edits.
    pub fn anchor(&mut self, cursor: Cursor) -> AnchorId {
        self.anchors.push(Some(cursor.clamped(&self.text)));
        AnchorId(self.anchors.len() - 1)
    }

    /// Current position of an anchored cursor, `None` once released.
    #[must_use]
    pub fn cursor(&self, id: AnchorId) -> Option<Cursor> {
        self.anchors.get(id.0).copied().flatten()
    }

    /// Move an anchored cursor. Returns `false` if it was released.
    pub fn set_cursor(&mut self, id: AnchorId, cursor: Cursor) -> bool {
        match self.anchors.get_mut(id.0) {
            Some(slot @ Some(_)) => {
                *slot = Some(cursor.clamped(&self.text));
                true
            }
            _ => false,
        }
    }

    /// Stop tracking a cursor and return its last position.
    pub fn release(&mut self, id: AnchorId) -> Option<Cursor> {
        self.anchors.get_mut(id.0).and_then(Option::take)
    }

    /// Bring the highlight cache up to date for the visible lines.
    pub fn refresh(&mut self, top: usize, bottom: usize) {
        self.highlighter
            .update_invalidated_lines(&self.text, top, bottom);
    }

    /// Matches starting on `line`, ordered by column.
    pub fn line_matches(&mut self, line: usize) -> &[Match] {
        self.highlighter.line_matches(line)
    }

    /// Whether the text changed since load or the last save.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Write the document and clear the modified flag.
    pub fn save_to<W: io::Write>(&mut self, writer: W) -> Result<u64> {
        let written = self.text.write_to(writer)?;
        self.modified = false;
        tracing::debug!(bytes = written, "document saved");
        Ok(written)
    }

    /// Invalidate the edited line, or everything below it when lines were
    /// added or removed.
    fn after_edit(&mut self, line: usize, lines_before: usize) {
        let lines = self.text.lines();
        let last = if lines == lines_before { line } else { lines - 1 };
        let first = line.min(lines - 1);
        self.highlighter.invalidate_lines(&self.text, first, last);
    }

    fn anchor_chars(&self) -> Vec<Option<usize>> {
        self.anchors
            .iter()
            .map(|slot| {
                slot.map(|c| {
                    let (line, col) = self.text.clamp_line_col(c.line(), c.col());
                    self.text.line_col_to_char(line, col)
                })
            })
            .collect()
    }

    fn restore_anchors(&mut self, chars: Vec<Option<usize>>, shift: impl Fn(usize) -> usize) {
        for (slot, pos) in self.anchors.iter_mut().zip(chars) {
            if let (Some(cursor), Some(pos)) = (slot.as_mut(), pos) {
                let (line, col) = self.text.char_to_line_col(shift(pos));
                *cursor = cursor.set_line_col(&self.text, line, col);
            }
        }
    }
}

//! Rope-backed text storage addressed by line and column.
//!
//! [`TextStorage`] is the document buffer underneath the editor. Every public
//! operation is addressed by `(line, col)` where `line` is zero-based and `col`
//! counts Unicode scalar values (runes) from the start of the line. Byte
//! offsets only appear through [`TextStorage::line_col_to_pos`] and
//! [`TextStorage::pos_to_line_col`].
//!
//! The rope keeps per-node newline counts, so finding the start of a line is a
//! tree descent rather than a scan from the start of the document.
//!
//! # Contract
//!
//! Range operations treat their end coordinate as inclusive, except
//! [`TextStorage::count`] which is end-exclusive. A `line` that does not exist
//! is a caller bug and panics; use [`TextStorage::clamp_line_col`] first when a
//! position is not already known to be valid. A `col` past the end of its line
//! is tolerated and addresses the line delimiter.
//!
//! # Examples
//!
//! ```
//! use qedit_core::TextStorage;
//!
//! let mut text = TextStorage::new("some");
//! text.insert(0, 4, " text\n");
//! text.insert(0, 0, "with\n\t");
//! text.remove(0, 4, 1, 5);
//! assert_eq!(text.to_string(), "withtext\n");
//! assert_eq!(text.lines(), 2);
//! ```

use crate::error::Result;
use crate::text::line_ending::LineEnding;
use ropey::Rope;
use std::borrow::Cow;
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one [`TextStorage`] instance.
///
/// Cursors and highlighters remember the id of the storage they were created
/// for instead of holding a reference to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferId(u64);

impl BufferId {
    fn next() -> Self {
        Self(NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Mutable, line/column addressable document text.
pub struct TextStorage {
    rope: Rope,
    line_ending: LineEnding,
    id: BufferId,
}

impl TextStorage {
    /// Create a storage holding `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self::from_rope(Rope::from_str(text))
    }

    /// Create a storage from raw bytes, which must be valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    /// Create a storage by reading `reader` to the end.
    ///
    /// Invalid UTF-8 surfaces as an [`io::ErrorKind::InvalidData`] I/O error.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        Ok(Self::from_rope(Rope::from_reader(reader)?))
    }

    fn from_rope(rope: Rope) -> Self {
        let line_ending = rope
            .chunks()
            .find(|chunk| chunk.contains(['\n', '\r']))
            .map(LineEnding::detect)
            .unwrap_or_default();
        Self {
            rope,
            line_ending,
            id: BufferId::next(),
        }
    }

    /// Identity of this storage.
    #[must_use]
    pub fn id(&self) -> BufferId {
        self.id
    }

    /// Line-ending convention inferred from the initial content.
    #[must_use]
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Number of bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Number of runes in the whole document.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of lines. Always at least 1: an empty document has one empty line,
    /// and a trailing `\n` starts a final empty line.
    #[must_use]
    pub fn lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of one line including its trailing delimiter.
    ///
    /// Borrowed when the line is contiguous in the rope; do not rely on either.
    ///
    /// # Panics
    ///
    /// Panics if `line >= self.lines()`.
    #[must_use]
    pub fn line(&self, line: usize) -> Cow<'_, str> {
        self.assert_line(line, "line");
        self.rope.line(line).into()
    }

    /// Text of the inclusive line range `[start_line, end_line]`, delimiters
    /// included. `end_line` is clamped to the last line.
    ///
    /// # Panics
    ///
    /// Panics if `start_line >= self.lines()`.
    #[must_use]
    pub fn lines_text(&self, start_line: usize, end_line: usize) -> Cow<'_, str> {
        self.assert_line(start_line, "lines_text");
        let end_line = end_line.clamp(start_line, self.lines() - 1);
        let start = self.rope.line_to_char(start_line);
        let end = self.rope.line_to_char(end_line + 1);
        self.rope.slice(start..end).into()
    }

    /// Text from `(start_line, start_col)` through `(end_line, end_col)` inclusive.
    ///
    /// An end that addresses a line delimiter includes the whole delimiter
    /// (`\r\n` counts as one position there). Never reads past the document.
    #[must_use]
    pub fn slice(
        &self,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Cow<'_, str> {
        let (start, end) = self.inclusive_char_range(start_line, start_col, end_line, end_col);
        self.rope.slice(start..end).into()
    }

    /// Copy of the whole document. O(n); use sparingly.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for chunk in self.rope.chunks() {
            out.extend_from_slice(chunk.as_bytes());
        }
        out
    }

    /// Insert `text` before the rune at `(line, col)`.
    ///
    /// No other positions are adjusted; cursors are re-clamped by their owner.
    ///
    /// # Panics
    ///
    /// Panics if `line >= self.lines()`.
    pub fn insert(&mut self, line: usize, col: usize, text: &str) {
        let at = self.line_col_to_char(line, col);
        tracing::trace!(line, col, at, bytes = text.len(), "text insert");
        self.rope.insert(at, text);
    }

    /// Delete `(start_line, start_col)` through `(end_line, end_col)` inclusive.
    pub fn remove(&mut self, start_line: usize, start_col: usize, end_line: usize, end_col: usize) {
        let (start, end) = self.inclusive_char_range(start_line, start_col, end_line, end_col);
        tracing::trace!(start, end, "text remove");
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Number of non-overlapping occurrences of `needle` between
    /// `(start_line, start_col)` and `(end_line, end_col)`, end **exclusive**.
    ///
    /// An empty needle counts zero occurrences.
    #[must_use]
    pub fn count(
        &self,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
        needle: &str,
    ) -> usize {
        let start = self.line_col_to_char(start_line, start_col);
        let end = self.line_col_to_char(end_line, end_col);
        if needle.is_empty() || end <= start {
            return 0;
        }
        let haystack: Cow<'_, str> = self.rope.slice(start..end).into();
        haystack.matches(needle).count()
    }

    /// Runes in `line`, excluding the delimiter.
    ///
    /// In a CRLF document a `\r` directly before `\n` belongs to the delimiter;
    /// in an LF document it is an ordinary rune.
    #[must_use]
    pub fn runes_in_line(&self, line: usize) -> usize {
        self.assert_line(line, "runes_in_line");
        let slice = self.rope.line(line);
        let content = self.line_content_chars(line);
        if self.line_ending == LineEnding::Crlf
            && content < slice.len_chars()
            && content > 0
            && slice.char(content - 1) == '\r'
        {
            content - 1
        } else {
            content
        }
    }

    /// Runes in `line` including the delimiter, counted with the document's
    /// line-ending convention (CRLF adds two).
    #[must_use]
    pub fn runes_in_line_with_delim(&self, line: usize) -> usize {
        let runes = self.runes_in_line(line);
        if self.line_has_delimiter(line) {
            runes + self.line_ending.rune_len()
        } else {
            runes
        }
    }

    /// Clamp a position into the document: the line first, then the column
    /// against the clamped line's rune count.
    #[must_use]
    pub fn clamp_line_col(&self, line: usize, col: usize) -> (usize, usize) {
        let line = line.min(self.lines() - 1);
        let col = col.min(self.runes_in_line(line));
        (line, col)
    }

    /// Rune index of `(line, col)`. A column past the line's content addresses
    /// the line's `\n`, or the end of the document on the last line.
    ///
    /// # Panics
    ///
    /// Panics if `line >= self.lines()`.
    #[must_use]
    pub fn line_col_to_char(&self, line: usize, col: usize) -> usize {
        self.assert_line(line, "line_col_to_char");
        self.rope.line_to_char(line) + col.min(self.line_content_chars(line))
    }

    /// Byte offset of `(line, col)`, with the same column tolerance as
    /// [`line_col_to_char`](Self::line_col_to_char).
    ///
    /// # Panics
    ///
    /// Panics if `line >= self.lines()`.
    #[must_use]
    pub fn line_col_to_pos(&self, line: usize, col: usize) -> usize {
        self.rope.char_to_byte(self.line_col_to_char(line, col))
    }

    /// `(line, col)` of a rune index, clamped to the document end.
    #[must_use]
    pub fn char_to_line_col(&self, char_idx: usize) -> (usize, usize) {
        let char_idx = char_idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_idx);
        (line, char_idx - self.rope.line_to_char(line))
    }

    /// `(line, col)` of a byte offset. Offsets past the end clamp to the end;
    /// an offset inside a multi-byte rune maps to that rune.
    #[must_use]
    pub fn pos_to_line_col(&self, pos: usize) -> (usize, usize) {
        let pos = pos.min(self.rope.len_bytes());
        self.char_to_line_col(self.rope.byte_to_char(pos))
    }

    /// Byte offset where `line` starts.
    ///
    /// # Panics
    ///
    /// Panics if `line >= self.lines()`.
    #[must_use]
    pub fn line_start_pos(&self, line: usize) -> usize {
        self.assert_line(line, "line_start_pos");
        self.rope.line_to_byte(line)
    }

    /// The rune at `(line, col)`, or `None` at the end of the document.
    #[must_use]
    pub fn rune_at(&self, line: usize, col: usize) -> Option<char> {
        let idx = self.line_col_to_char(line, col);
        (idx < self.rope.len_chars()).then(|| self.rope.char(idx))
    }

    /// Stream the document, byte for byte, into `writer`. Returns the number
    /// of bytes written.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> Result<u64> {
        let mut written = 0u64;
        for chunk in self.rope.chunks() {
            writer.write_all(chunk.as_bytes())?;
            written += chunk.len() as u64;
        }
        writer.flush()?;
        Ok(written)
    }

    /// Iterator over runes starting at a rune index. Supports `prev()`.
    pub(crate) fn chars_at(&self, char_idx: usize) -> ropey::iter::Chars<'_> {
        self.rope.chars_at(char_idx.min(self.rope.len_chars()))
    }

    fn assert_line(&self, line: usize, op: &str) {
        let lines = self.lines();
        assert!(
            line < lines,
            "{op}: line {line} out of range for buffer with {lines} lines"
        );
    }

    fn line_has_delimiter(&self, line: usize) -> bool {
        line + 1 < self.lines()
    }

    /// Runes before the line's `\n` (a preceding `\r` is counted).
    fn line_content_chars(&self, line: usize) -> usize {
        let len = self.rope.line(line).len_chars();
        if self.line_has_delimiter(line) {
            len - 1
        } else {
            len
        }
    }

    fn inclusive_char_range(
        &self,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> (usize, usize) {
        let start = self.line_col_to_char(start_line, start_col);
        let end = if end_col >= self.runes_in_line(end_line) && self.line_has_delimiter(end_line) {
            self.rope.line_to_char(end_line + 1)
        } else {
            (self.line_col_to_char(end_line, end_col) + 1).min(self.rope.len_chars())
        };
        (start.min(end), end)
    }
}

impl Clone for TextStorage {
    /// A clone is a separate document and gets its own [`BufferId`].
    fn clone(&self) -> Self {
        Self {
            rope: self.rope.clone(),
            line_ending: self.line_ending,
            id: BufferId::next(),
        }
    }
}

impl Default for TextStorage {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for TextStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextStorage")
            .field("id", &self.id)
            .field("line_ending", &self.line_ending)
            .field("len", &self.len())
            .field("lines", &self.lines())
            .finish()
    }
}

impl fmt::Display for TextStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl From<&str> for TextStorage {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

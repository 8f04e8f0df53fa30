//! Text storage and navigation.
//!
//! Key types:
//!
//! - [`TextStorage`]: Rope-backed document text addressed by line and rune column
//! - [`Cursor`]: Position bound to a storage, with editor-style movements
//! - [`Region`]: Inclusive selection between two cursors
//! - [`LineEnding`]: LF/CRLF convention inferred from the initial content
//!
//! The [`measure`] module converts rune columns to terminal cells.
//!
//! # Examples
//!
//! ```
//! use qedit_core::{Cursor, TextStorage};
//!
//! let mut text = TextStorage::new("this\nis (は)\n");
//! assert_eq!(text.lines(), 3);
//! assert_eq!(text.runes_in_line(1), 6);
//!
//! let cursor = Cursor::at(&text, 1, 4);
//! assert_eq!(text.slice(1, 4, 1, 4), "は");
//!
//! text.insert(1, 4, "ha ");
//! let cursor = cursor.clamped(&text).right(&text);
//! assert_eq!(cursor.line_col(), (1, 5));
//! ```

mod cursor;
mod line_ending;
pub mod measure;
mod region;
mod storage;

pub use cursor::{CharClass, Cursor};
pub use line_ending::LineEnding;
pub use region::Region;
pub use storage::{BufferId, TextStorage};

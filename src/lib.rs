//! `qedit_core` - Text storage and editing core for a terminal editor
//!
//! A rope-backed document addressed by line and rune column, editor cursors
//! with a sticky column and word motions, and an incremental regex highlighter
//! that caches matches per line.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use qedit_core::highlight::{languages, Colorscheme, Highlighter, Syntax};
//! use qedit_core::TextStorage;
//!
//! let text = TextStorage::new("if x {}\n");
//! let language = Arc::new(languages::go().unwrap());
//! let mut hl = Highlighter::new(&text, language, Arc::new(Colorscheme::default_dark()));
//!
//! hl.update_invalidated_lines(&text, 0, 1);
//! let matches = hl.line_matches(0);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].syntax, Syntax::Keyword);
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Rule ids are u32
#![allow(clippy::module_name_repetitions)] // Allow highlight::Highlighter etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Out-of-range panics are documented per type
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod color;
pub mod document;
pub mod error;
pub mod highlight;
pub mod style;
pub mod text;

// Re-export core types at crate root
pub use color::Rgba;
pub use document::{AnchorId, Document};
pub use error::{Error, Result};
pub use style::{Style, TextAttributes};

// Re-export text types
pub use text::{BufferId, CharClass, Cursor, LineEnding, Region, TextStorage};

// Re-export highlight types
pub use highlight::{Colorscheme, Highlighter, Language, Match, RuleId, RuleSpec, Syntax};

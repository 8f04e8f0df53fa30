//! Property-based tests for text storage, cursors and incremental highlighting.
//!
//! Uses proptest to verify invariants that must hold across all valid inputs.

use std::sync::Arc;

use proptest::prelude::*;
use qedit_core::highlight::{Colorscheme, Highlighter, Match, languages};
use qedit_core::{Cursor, Document, TextStorage};

// ============================================================================
// Strategies
// ============================================================================

/// Arbitrary UTF-8 (proptest default).
fn utf8_string() -> impl Strategy<Value = String> {
    "\\PC{0,100}"
}

/// Documents built from mixed-width lines joined with LF or CRLF.
fn document() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[a-z は\té]{0,12}", 1..8),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(lines, crlf, trailing)| {
            let ending = if crlf { "\r\n" } else { "\n" };
            let mut doc = lines.join(ending);
            if trailing {
                doc.push_str(ending);
            }
            doc
        })
}

/// Inserted text: never contains `\r`.
fn fragment() -> impl Strategy<Value = String> {
    "[a-zé\n\t ]{1,10}"
}

const GO_TOKENS: [&str; 10] = [
    "if ", "x", " 12", "\n", "// c", "\"s\"", "nil", "é", "func", "0x1F",
];

fn go_source() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(GO_TOKENS.to_vec()), 0..40)
        .prop_map(|parts| parts.concat())
}

#[derive(Clone, Debug)]
enum Edit {
    Insert { line: usize, col: usize, token: usize },
    Remove { line: usize, col: usize, len: usize },
}

fn edits() -> impl Strategy<Value = Vec<Edit>> {
    prop::collection::vec(
        prop_oneof![
            (0usize..12, 0usize..20, 0..GO_TOKENS.len())
                .prop_map(|(line, col, token)| Edit::Insert { line, col, token }),
            (0usize..12, 0usize..20, 0usize..8)
                .prop_map(|(line, col, len)| Edit::Remove { line, col, len }),
        ],
        0..12,
    )
}

#[derive(Clone, Copy, Debug)]
enum Move {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    NextWord,
    PrevWord,
}

fn moves() -> impl Strategy<Value = Vec<Move>> {
    prop::collection::vec(
        prop::sample::select(vec![
            Move::Left,
            Move::Right,
            Move::Up,
            Move::Down,
            Move::LineStart,
            Move::LineEnd,
            Move::NextWord,
            Move::PrevWord,
        ]),
        0..40,
    )
}

fn fresh_matches(text: &TextStorage) -> Vec<Vec<Match>> {
    let mut hl = Highlighter::new(
        text,
        Arc::new(languages::go().unwrap()),
        Arc::new(Colorscheme::default_dark()),
    );
    hl.update_lines(text, 0, text.lines() - 1);
    (0..text.lines()).map(|l| hl.line_matches(l).to_vec()).collect()
}

// ============================================================================
// Storage Properties
// ============================================================================

proptest! {
    /// Writing a buffer out reproduces its initial content byte for byte.
    #[test]
    fn write_to_round_trips(s in utf8_string()) {
        let text = TextStorage::new(&s);
        let mut out = Vec::new();
        let written = text.write_to(&mut out).unwrap();
        prop_assert_eq!(written, s.len() as u64);
        prop_assert_eq!(out, s.as_bytes());
        prop_assert_eq!(text.bytes(), s.as_bytes());
    }

    /// Line count is one more than the number of `\n` in the document.
    #[test]
    fn line_count_matches_newlines(s in document()) {
        let text = TextStorage::new(&s);
        let last = text.lines() - 1;
        let newlines = text.count(0, 0, last, text.runes_in_line(last), "\n");
        prop_assert!(text.lines() >= 1);
        prop_assert_eq!(text.lines(), newlines + 1);
        prop_assert_eq!(text.lines(), s.matches('\n').count() + 1);
    }

    /// Clamping an already clamped position changes nothing.
    #[test]
    fn clamp_is_idempotent(s in document(), line in 0usize..20, col in 0usize..30) {
        let text = TextStorage::new(&s);
        let once = text.clamp_line_col(line, col);
        prop_assert_eq!(text.clamp_line_col(once.0, once.1), once);
    }

    /// Removing exactly what was inserted restores the document.
    #[test]
    fn insert_then_remove_restores(
        s in document(),
        line in 0usize..10,
        col in 0usize..15,
        data in fragment(),
    ) {
        let mut text = TextStorage::new(&s);
        let (line, col) = text.clamp_line_col(line, col);
        let at = text.line_col_to_char(line, col);

        text.insert(line, col, &data);
        prop_assert_eq!(text.len(), s.len() + data.len());

        let (end_line, end_col) = text.char_to_line_col(at + data.chars().count() - 1);
        text.remove(line, col, end_line, end_col);
        prop_assert_eq!(text.to_string(), s);
    }

    /// Byte offsets on rune boundaries survive a trip through (line, col).
    #[test]
    fn position_round_trip(s in document()) {
        let text = TextStorage::new(&s);
        for pos in (0..=s.len()).filter(|&p| s.is_char_boundary(p)) {
            let (line, col) = text.pos_to_line_col(pos);
            prop_assert_eq!(text.line_col_to_pos(line, col), pos);
        }
    }

    /// Slices are contiguous pieces of the document on rune boundaries.
    #[test]
    fn slices_are_utf8_safe(
        s in document(),
        a in (0usize..10, 0usize..15),
        b in (0usize..10, 0usize..15),
    ) {
        let text = TextStorage::new(&s);
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let (sl, sc) = text.clamp_line_col(start.0, start.1);
        let (el, ec) = text.clamp_line_col(end.0, end.1);
        let slice = text.slice(sl, sc, el, ec);
        let from = text.line_col_to_pos(sl, sc);
        prop_assert!(s.is_char_boundary(from));
        prop_assert!(s[from..].starts_with(&*slice));
    }

    /// Cursors remain valid positions after any sequence of movements.
    #[test]
    fn cursor_moves_stay_in_bounds(s in document(), moves in moves()) {
        let text = TextStorage::new(&s);
        let mut cursor = Cursor::new(&text);
        for m in moves {
            cursor = match m {
                Move::Left => cursor.left(&text),
                Move::Right => cursor.right(&text),
                Move::Up => cursor.up(&text),
                Move::Down => cursor.down(&text),
                Move::LineStart => cursor.line_start(&text),
                Move::LineEnd => cursor.line_end(&text),
                Move::NextWord => cursor.next_word_boundary_end(&text),
                Move::PrevWord => cursor.prev_word_boundary_start(&text),
            };
            let (line, col) = cursor.line_col();
            prop_assert_eq!(text.clamp_line_col(line, col), (line, col), "after {:?}", m);
        }
    }
}

// ============================================================================
// Highlighter Properties
// ============================================================================

proptest! {
    /// Incremental highlighting after edits agrees with a fresh highlight.
    #[test]
    fn incremental_highlight_matches_fresh(source in go_source(), edits in edits()) {
        let mut doc = Document::new(
            TextStorage::new(&source),
            Arc::new(languages::go().unwrap()),
            Arc::new(Colorscheme::default_dark()),
        );
        doc.refresh(0, doc.text().lines() - 1);

        for edit in edits {
            match edit {
                Edit::Insert { line, col, token } => {
                    let (line, col) = doc.text().clamp_line_col(line, col);
                    doc.insert(line, col, GO_TOKENS[token]);
                }
                Edit::Remove { line, col, len } => {
                    let (line, col) = doc.text().clamp_line_col(line, col);
                    doc.remove(line, col, line, col + len);
                }
            }
        }

        let bottom = doc.text().lines() - 1;
        doc.refresh(0, bottom);
        prop_assert!(!doc.highlighter().has_invalidated_lines(doc.text(), 0, bottom));

        let fresh = fresh_matches(doc.text());
        for (line, expected) in fresh.iter().enumerate() {
            prop_assert_eq!(doc.line_matches(line), expected.as_slice(), "line {}", line);
        }
    }
}

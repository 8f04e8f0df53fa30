//! E2E tests for the highlighting pipeline: storage edits, invalidation and
//! incremental recomputation through [`Document`].
//!
//! Run with:
//!   cargo test --test `highlight_e2e` -- --nocapture
//! With logging:
//!   `RUST_LOG=debug` cargo test --test `highlight_e2e` -- --nocapture

use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;

use qedit_core::highlight::{
    Colorscheme, Highlighter, Language, Match, RegionKind, Rule, SpanMatcher, Syntax, languages,
};
use qedit_core::{Cursor, Document, TextStorage};
use tracing::{Level, debug, info, span};

const SAMPLE_GO: &str = include_str!("fixtures/sample.go");

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_test_writer()
        .try_init();
}

fn go() -> Arc<Language> {
    Arc::new(languages::go().expect("go rules compile"))
}

fn categories(matches: &[Match]) -> Vec<(usize, Syntax)> {
    matches.iter().map(|m| (m.col, m.syntax)).collect()
}

/// Every line's matches, freshly computed on a new highlighter.
fn fresh_matches(text: &TextStorage, language: Arc<Language>) -> Vec<Vec<Match>> {
    let mut hl = Highlighter::new(text, language, Arc::new(Colorscheme::default_dark()));
    hl.update_lines(text, 0, text.lines() - 1);
    (0..text.lines()).map(|l| hl.line_matches(l).to_vec()).collect()
}

fn assert_well_formed(text: &TextStorage, line: usize, matches: &[Match]) {
    let mut last_col = 0usize;
    for m in matches {
        assert!(m.col >= last_col, "line {line}: matches not sorted");
        assert!(m.col < text.runes_in_line_with_delim(line).max(1));
        assert!((m.end_line, m.end_col) >= (line, m.col), "line {line}: end before start");
        last_col = m.col;
    }
}

/// Pairs `/*` with the next `*/`.
struct BlockComments;

impl SpanMatcher for BlockComments {
    fn find_spans(&self, rule: &Rule, text: &str) -> Vec<Range<usize>> {
        let RegionKind::Span(patterns) = rule.region() else {
            return Vec::new();
        };
        let mut spans = Vec::new();
        let mut from = 0;
        while let Some(start) = rule.start().find_at(text, from) {
            let end = patterns
                .end
                .find_at(text, start.end())
                .map_or(text.len(), |m| m.end());
            spans.push(start.start()..end);
            from = end;
        }
        spans
    }
}

// ============================================================================
// Full-file highlighting
// ============================================================================

#[test]
fn e2e_go_file_highlighting() {
    init_logging();
    let span = span!(Level::INFO, "e2e_go_file");
    let _enter = span.enter();

    let text = TextStorage::new(SAMPLE_GO);
    let mut hl = Highlighter::new(&text, go(), Arc::new(Colorscheme::default_dark()));

    let start = Instant::now();
    hl.update_invalidated_lines(&text, 0, text.lines() - 1);
    info!(elapsed = ?start.elapsed(), lines = text.lines(), "initial highlighting complete");
    assert!(!hl.has_invalidated_lines(&text, 0, text.lines() - 1));

    for line in 0..text.lines() {
        let matches = hl.line_matches(line).to_vec();
        debug!(line, count = matches.len(), "line highlighted");
        assert_well_formed(&text, line, &matches);
    }

    assert_eq!(categories(hl.line_matches(0)), vec![(0, Syntax::Keyword)]);
    assert_eq!(
        categories(hl.line_matches(2)),
        vec![(0, Syntax::Keyword), (7, Syntax::String)]
    );
    assert_eq!(categories(hl.line_matches(4)), vec![(0, Syntax::Comment)]);
    assert_eq!(
        categories(hl.line_matches(5)),
        vec![(0, Syntax::Keyword), (11, Syntax::Type)]
    );
    assert_eq!(
        categories(hl.line_matches(17)),
        vec![(1, Syntax::Keyword), (10, Syntax::Number), (17, Syntax::Number)]
    );
    assert_eq!(hl.line_matches(17)[2].end_col, 20);
    assert_eq!(
        categories(hl.line_matches(18)),
        vec![(8, Syntax::Builtin), (26, Syntax::Type), (36, Syntax::Number)]
    );
    assert_eq!(
        categories(hl.line_matches(20)),
        vec![
            (1, Syntax::Keyword),
            (4, Syntax::Builtin),
            (16, Syntax::Number),
            (28, Syntax::Special),
        ]
    );
    assert_eq!(
        categories(hl.line_matches(23)),
        vec![(23, Syntax::Number), (27, Syntax::Number), (31, Syntax::Special)]
    );

    // Block comments need a span matcher.
    assert!(hl.line_matches(9).is_empty());
}

#[test]
fn e2e_block_comment_with_span_matcher() {
    init_logging();
    let text = TextStorage::new(SAMPLE_GO);
    let mut hl = Highlighter::new(&text, go(), Arc::new(Colorscheme::default_dark()))
        .with_span_matcher(BlockComments);
    hl.update_lines(&text, 0, text.lines() - 1);

    let comment = hl.line_matches(9)[0];
    assert_eq!(comment.syntax, Syntax::Comment);
    assert_eq!((comment.col, comment.end_line, comment.end_col), (0, 10, 26));
    assert!(hl.line_matches(10).is_empty());
}

#[test]
fn e2e_styles_follow_colorscheme() {
    let text = TextStorage::new("return nil // done\n");
    let scheme = Arc::new(Colorscheme::default_dark());
    let mut hl = Highlighter::new(&text, go(), Arc::clone(&scheme));
    hl.update_lines(&text, 0, 0);

    let styles: Vec<_> = hl
        .line_matches(0)
        .to_vec()
        .iter()
        .map(|m| hl.style(m))
        .collect();
    assert_eq!(
        styles,
        vec![
            scheme.style(Syntax::Keyword),
            scheme.style(Syntax::Special),
            scheme.style(Syntax::Comment),
        ]
    );
}

// ============================================================================
// Editing sessions
// ============================================================================

#[test]
fn e2e_incremental_matches_fresh_after_edits() {
    init_logging();
    let span = span!(Level::INFO, "e2e_incremental");
    let _enter = span.enter();

    let mut doc = Document::new(
        TextStorage::new(SAMPLE_GO),
        go(),
        Arc::new(Colorscheme::default_dark()),
    );
    doc.refresh(0, doc.text().lines() - 1);

    let caret = doc.anchor(Cursor::at(doc.text(), 16, 1));

    doc.insert(15, 0, "// entry point\n");
    doc.insert(17, 1, "defer fmt.Println(\"bye\")\n\t");
    doc.remove(21, 0, 23, 1);
    doc.insert(3, 0, "const limit = 0o17\n");
    doc.remove(0, 0, 0, 7);
    doc.insert(0, 0, "package");

    let bottom = doc.text().lines() - 1;
    doc.refresh(0, bottom);

    let fresh = fresh_matches(doc.text(), go());
    for (line, expected) in fresh.iter().enumerate() {
        assert_eq!(doc.line_matches(line), expected.as_slice(), "line {line}");
    }

    let caret = doc.cursor(caret).expect("anchor is live");
    debug!(line_col = ?caret.line_col(), "caret after edits");
    assert_eq!(
        doc.text().rune_at(caret.line(), caret.col()),
        Some('p'),
        "caret stays on the `pts` it was placed on"
    );
}

#[test]
fn e2e_refresh_only_scans_viewport() {
    let body: String = (0..200).map(|i| format!("x{i} := {i}\n")).collect();
    let mut doc = Document::new(
        TextStorage::new(&body),
        go(),
        Arc::new(Colorscheme::default_dark()),
    );
    doc.refresh(50, 80);
    assert!(!doc.highlighter().has_invalidated_lines(doc.text(), 50, 80));
    assert!(doc.highlighter().has_invalidated_lines(doc.text(), 0, 49));
    assert!(doc.highlighter().has_invalidated_lines(doc.text(), 81, 200));

    let first = doc.line_matches(50).to_vec();
    assert_eq!(categories(&first), vec![(7, Syntax::Number)]);
}

#[test]
fn e2e_crlf_document_round_trip() {
    let source = "package main\r\n\r\nfunc f() int {\r\n\treturn 0\r\n}\r\n";
    let mut doc = Document::new(
        TextStorage::new(source),
        go(),
        Arc::new(Colorscheme::default_dark()),
    );
    doc.refresh(0, 10);
    assert_eq!(
        categories(doc.line_matches(2)),
        vec![(0, Syntax::Keyword), (9, Syntax::Type)]
    );

    let ending = doc.text().line_ending().as_str();
    doc.insert(3, 9, &format!("{ending}\treturn 1"));
    let mut out = Vec::new();
    doc.save_to(&mut out).expect("write to vec");
    assert_eq!(
        String::from_utf8(out).expect("utf8"),
        "package main\r\n\r\nfunc f() int {\r\n\treturn 0\r\n\treturn 1\r\n}\r\n"
    );
}

//! Conversion between rune columns and terminal display columns.
//!
//! Buffer positions count runes; a terminal counts cells. Wide characters
//! take two cells, zero-width marks take none, and a hard tab advances to the
//! next multiple of the tab width.

use unicode_width::UnicodeWidthChar;

fn advance(display: usize, ch: char, tab_width: usize) -> usize {
    match ch {
        '\t' if tab_width > 0 => (display / tab_width + 1) * tab_width,
        '\t' => display,
        _ => display + ch.width().unwrap_or(0),
    }
}

fn content(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Display column where rune column `col` of `line` starts.
///
/// `line` may include its delimiter; columns past the content clamp to its end.
#[must_use]
pub fn display_col(line: &str, col: usize, tab_width: usize) -> usize {
    content(line)
        .chars()
        .take(col)
        .fold(0, |display, ch| advance(display, ch, tab_width))
}

/// Rune column covering display column `target` of `line`.
///
/// A target inside a wide character or a tab maps to that rune; a target past
/// the content maps to the end of the line.
#[must_use]
pub fn col_for_display(line: &str, target: usize, tab_width: usize) -> usize {
    let mut display = 0;
    for (col, ch) in content(line).chars().enumerate() {
        let next = advance(display, ch, tab_width);
        if target < next {
            return col;
        }
        display = next;
    }
    content(line).chars().count()
}

/// Total display width of `line` excluding its delimiter.
#[must_use]
pub fn display_width(line: &str, tab_width: usize) -> usize {
    display_col(line, usize::MAX, tab_width)
}

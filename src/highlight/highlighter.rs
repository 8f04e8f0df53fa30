//! Incremental regex highlighter with a per-line match cache.
//!
//! The highlighter never reads the document on its own: every operation is
//! handed the [`TextStorage`] it was created for. The editing session is
//! responsible for calling [`Highlighter::invalidate_lines`] after each edit
//! (see [`Document`](crate::Document), which does this automatically).

use crate::highlight::colorscheme::Colorscheme;
use crate::highlight::language::{Language, RegionKind, Rule, RuleId};
use crate::highlight::syntax::Syntax;
use crate::style::Style;
use crate::text::{BufferId, TextStorage};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// A highlighted span that starts on the line it is cached under.
///
/// The end is inclusive and may lie on a later line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    /// Rune column of the first rune.
    pub col: usize,
    pub end_line: usize,
    /// Rune column of the last rune.
    pub end_col: usize,
    pub syntax: Syntax,
    pub rule: RuleId,
}

/// Matcher for multi-line region rules ([`RegionKind::Span`]).
///
/// Receives the text being re-highlighted and returns byte ranges within it.
/// Ranges may cross line breaks; empty ranges are ignored.
pub trait SpanMatcher {
    fn find_spans(&self, rule: &Rule, text: &str) -> Vec<Range<usize>>;
}

/// Incremental highlighter for one document.
///
/// Each line's cache entry is either invalid (`None`) or the list of matches
/// starting on that line. Lines are recomputed only on request.
pub struct Highlighter {
    buffer: BufferId,
    language: Arc<Language>,
    colorscheme: Arc<Colorscheme>,
    span_matcher: Option<Box<dyn SpanMatcher>>,
    line_matches: Vec<Option<Vec<Match>>>,
}

impl Highlighter {
    /// Create a highlighter with every line invalidated.
    #[must_use]
    pub fn new(text: &TextStorage, language: Arc<Language>, colorscheme: Arc<Colorscheme>) -> Self {
        Self {
            buffer: text.id(),
            language,
            colorscheme,
            span_matcher: None,
            line_matches: vec![None; text.lines()],
        }
    }

    /// Install a matcher for multi-line rules (builder pattern).
    #[must_use]
    pub fn with_span_matcher(mut self, matcher: impl SpanMatcher + 'static) -> Self {
        self.set_span_matcher(matcher);
        self
    }

    /// Install or replace the matcher for multi-line rules. Every line is
    /// invalidated.
    pub fn set_span_matcher(&mut self, matcher: impl SpanMatcher + 'static) {
        self.span_matcher = Some(Box::new(matcher));
        self.invalidate_all();
    }

    #[must_use]
    pub fn language(&self) -> &Arc<Language> {
        &self.language
    }

    /// Replace the rule set. Every line is invalidated.
    pub fn set_language(&mut self, language: Arc<Language>) {
        self.language = language;
        self.invalidate_all();
    }

    #[must_use]
    pub fn colorscheme(&self) -> &Arc<Colorscheme> {
        &self.colorscheme
    }

    /// Replace the colorscheme. Cached matches stay valid.
    pub fn set_colorscheme(&mut self, colorscheme: Arc<Colorscheme>) {
        self.colorscheme = colorscheme;
    }

    /// Style of a match under the current colorscheme.
    #[must_use]
    pub fn style(&self, m: &Match) -> Style {
        self.colorscheme.style(m.syntax)
    }

    /// Recompute matches for lines `[start_line, end_line]`.
    ///
    /// `end_line` is clamped to the last line; an empty range is a no-op.
    pub fn update_lines(&mut self, text: &TextStorage, start_line: usize, end_line: usize) {
        let Some((start_line, end_line)) = self.prepare_range(text, start_line, end_line) else {
            return;
        };

        for entry in &mut self.line_matches[start_line..=end_line] {
            match entry {
                Some(matches) => matches.clear(),
                None => *entry = Some(Vec::new()),
            }
        }

        let base = text.line_start_pos(start_line);
        let slice = text.lines_text(start_line, end_line);
        let language = Arc::clone(&self.language);
        let mut found = 0usize;

        for rule in language.rules() {
            let ranges: Vec<Range<usize>> = match (rule.region(), &self.span_matcher) {
                (RegionKind::Line, _) => rule.start().find_iter(&slice).map(|m| m.range()).collect(),
                (RegionKind::Span(_), Some(matcher)) => matcher.find_spans(rule, &slice),
                (RegionKind::Span(_), None) => {
                    tracing::trace!(rule = rule.id().get(), "multi-line rule skipped");
                    continue;
                }
            };

            for range in ranges {
                let end = range.end.min(slice.len());
                if range.start >= end {
                    continue;
                }
                let (line, col) = text.pos_to_line_col(base + range.start);
                let (end_line, end_col) = text.pos_to_line_col(base + end - 1);
                if let Some(Some(bucket)) = self.line_matches.get_mut(line) {
                    bucket.push(Match {
                        col,
                        end_line,
                        end_col,
                        syntax: rule.syntax(),
                        rule: rule.id(),
                    });
                    found += 1;
                }
            }
        }

        tracing::debug!(start_line, end_line, matches = found, "highlight lines updated");
    }

    /// Recompute the smallest range covering every invalidated line within
    /// `[start_line, end_line]`. Does nothing if none are invalidated.
    pub fn update_invalidated_lines(
        &mut self,
        text: &TextStorage,
        start_line: usize,
        end_line: usize,
    ) {
        let Some((start_line, end_line)) = self.prepare_range(text, start_line, end_line) else {
            return;
        };
        let invalid = |l: &usize| self.line_matches[*l].is_none();
        let Some(first) = (start_line..=end_line).find(invalid) else {
            return;
        };
        let last = (first..=end_line).rev().find(invalid).unwrap_or(first);
        self.update_lines(text, first, last);
    }

    /// Whether any line in `[start_line, end_line]` needs recomputation.
    #[must_use]
    pub fn has_invalidated_lines(&self, text: &TextStorage, start_line: usize, end_line: usize) -> bool {
        self.check_buffer(text);
        let last = text.lines() - 1;
        if start_line > last || start_line > end_line {
            return false;
        }
        (start_line..=end_line.min(last))
            .any(|l| self.line_matches.get(l).is_none_or(Option::is_none))
    }

    /// Mark lines `[start_line, end_line]` for recomputation.
    ///
    /// Earlier lines holding a match that reaches into the range are marked
    /// too, since only their start line can recompute such a match.
    pub fn invalidate_lines(&mut self, text: &TextStorage, start_line: usize, end_line: usize) {
        let Some((start_line, end_line)) = self.prepare_range(text, start_line, end_line) else {
            return;
        };
        for entry in &mut self.line_matches[start_line..=end_line] {
            *entry = None;
        }

        let mut spanning = 0usize;
        for entry in &mut self.line_matches[..start_line] {
            let reaches = entry
                .as_ref()
                .is_some_and(|matches| matches.iter().any(|m| m.end_line >= start_line));
            if reaches {
                *entry = None;
                spanning += 1;
            }
        }
        if spanning > 0 {
            tracing::trace!(start_line, lines = spanning, "invalidated lines spanning into range");
        }
    }

    /// Mark every line for recomputation.
    pub fn invalidate_all(&mut self) {
        self.line_matches.fill(None);
    }

    /// Matches starting on `line`, ordered by column.
    ///
    /// Empty for an out-of-range or invalidated line.
    pub fn line_matches(&mut self, line: usize) -> &[Match] {
        match self.line_matches.get_mut(line) {
            Some(Some(matches)) => {
                matches.sort_by_key(|m| m.col);
                matches
            }
            _ => &[],
        }
    }

    /// Whether `line` holds computed matches.
    #[must_use]
    pub fn is_cached(&self, line: usize) -> bool {
        matches!(self.line_matches.get(line), Some(Some(_)))
    }

    /// Resize the cache to the document and clamp the range to it.
    fn prepare_range(
        &mut self,
        text: &TextStorage,
        start_line: usize,
        end_line: usize,
    ) -> Option<(usize, usize)> {
        self.check_buffer(text);
        let lines = text.lines();
        self.line_matches.resize(lines, None);
        let end_line = end_line.min(lines - 1);
        (start_line <= end_line).then_some((start_line, end_line))
    }

    fn check_buffer(&self, text: &TextStorage) {
        debug_assert_eq!(
            self.buffer,
            text.id(),
            "highlighter used with a different buffer"
        );
    }
}

impl fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Highlighter")
            .field("buffer", &self.buffer)
            .field("language", &self.language.name())
            .field("colorscheme", &self.colorscheme.name())
            .field("span_matcher", &self.span_matcher.is_some())
            .field("lines", &self.line_matches.len())
            .finish()
    }
}

//! Built-in rule sets.

use crate::error::Result;
use crate::highlight::language::{Language, RuleSpec};
use crate::highlight::syntax::Syntax;

/// Go, as highlighted by the editor out of the box.
///
/// Block comments are a multi-line rule and only highlight when a
/// [`SpanMatcher`](crate::highlight::SpanMatcher) is installed.
pub fn go() -> Result<Language> {
    Language::builder("Go")
        .filetype(".go")
        .rule(RuleSpec::new(r"//[^\r\n]*", Syntax::Comment))
        .rule(RuleSpec::new(r#""[^"\r\n]*""#, Syntax::String))
        .rule(RuleSpec::keywords(
            &[
                "var",
                "const",
                "if",
                "else",
                "range",
                "for",
                "switch",
                "fallthrough",
                "case",
                "default",
                "break",
                "continue",
                "go",
                "func",
                "return",
                "defer",
                "import",
                "type",
                "package",
            ],
            Syntax::Keyword,
        ))
        .rule(RuleSpec::new(
            r"\b(u?int(8|16|32|64)?|rune|byte|string|bool|struct)\b",
            Syntax::Type,
        ))
        .rule(RuleSpec::new(
            r"\b([1-9][0-9]*|0[0-7]*|0[Xx][0-9A-Fa-f]+|0[Bb][01]+)\b",
            Syntax::Number,
        ))
        .rule(RuleSpec::keywords(
            &["len", "cap", "panic", "make", "copy", "append"],
            Syntax::Builtin,
        ))
        .rule(RuleSpec::keywords(&["nil", "true", "false"], Syntax::Special))
        .rule(RuleSpec::new(r"/\*", Syntax::Comment).end(r"\*/"))
        .build()
}

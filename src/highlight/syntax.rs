//! Lexical categories assigned by highlight rules.

use std::fmt;

/// Semantic category of a highlighted span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Syntax {
    /// Unclassified text.
    #[default]
    Default,
    Keyword,
    String,
    Type,
    Number,
    Builtin,
    Comment,
    DocComment,
    /// Language constants and other notable identifiers (`nil`, `true`, ...).
    Special,
    Error,
}

impl Syntax {
    /// Number of categories.
    pub const COUNT: usize = 10;

    /// Every category, in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Default,
        Self::Keyword,
        Self::String,
        Self::Type,
        Self::Number,
        Self::Builtin,
        Self::Comment,
        Self::DocComment,
        Self::Special,
        Self::Error,
    ];

    /// Dense index, usable for array-backed lookup tables.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self as usize
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Keyword => "keyword",
            Self::String => "string",
            Self::Type => "type",
            Self::Number => "number",
            Self::Builtin => "builtin",
            Self::Comment => "comment",
            Self::DocComment => "doc-comment",
            Self::Special => "special",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

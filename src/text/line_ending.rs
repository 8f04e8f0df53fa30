//! Line-ending convention of a document.

/// Line delimiter convention, inferred once from a document's initial content.
///
/// Mixed line endings are not reconciled: a document is either LF or CRLF,
/// decided by whichever of `\n` or `\r` appears first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// Unix `\n`.
    #[default]
    Lf,
    /// Windows `\r\n`.
    Crlf,
}

impl LineEnding {
    /// Infer the convention from the first `\n` or `\r` in `text`.
    ///
    /// Content without any delimiter is treated as LF.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        text.bytes()
            .find_map(|b| match b {
                b'\n' => Some(Self::Lf),
                b'\r' => Some(Self::Crlf),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// The delimiter text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }

    /// Number of runes the delimiter occupies.
    #[must_use]
    pub const fn rune_len(self) -> usize {
        match self {
            Self::Lf => 1,
            Self::Crlf => 2,
        }
    }
}

//! Styles assigned to highlight categories.
//!
//! A [`Style`] is what a colorscheme hands the renderer for one match: an
//! optional foreground, an optional background and a set of
//! [`TextAttributes`].
//!
//! # Examples
//!
//! ```
//! use qedit_core::{Rgba, Style, TextAttributes};
//!
//! let keyword = Style::fg(Rgba::NAVY).with_bg(Rgba::BLACK).with_bold();
//! assert!(keyword.attributes.contains(TextAttributes::BOLD));
//! assert!(!keyword.is_empty());
//! ```

use crate::color::Rgba;
use bitflags::bitflags;

bitflags! {
    /// Terminal text attributes. Support varies by terminal.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        const BOLD          = 0x01;
        const DIM           = 0x02;
        const ITALIC        = 0x04;
        const UNDERLINE     = 0x08;
        const BLINK         = 0x10;
        /// Foreground and background swapped.
        const INVERSE       = 0x20;
        const HIDDEN        = 0x40;
        const STRIKETHROUGH = 0x80;
    }
}

/// Colors and attributes for one highlight category.
///
/// A color left as `None` means the terminal's own default, so unstyled
/// categories blend with the user's terminal theme.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Style {
    pub fg: Option<Rgba>,
    pub bg: Option<Rgba>,
    pub attributes: TextAttributes,
}

impl Style {
    /// No colors, no attributes.
    pub const NONE: Self = Self {
        fg: None,
        bg: None,
        attributes: TextAttributes::empty(),
    };

    /// Foreground only.
    #[must_use]
    pub const fn fg(color: Rgba) -> Self {
        Self::NONE.with_fg(color)
    }

    /// Bold with terminal default colors.
    #[must_use]
    pub const fn bold() -> Self {
        Self::NONE.with_bold()
    }

    #[must_use]
    pub const fn with_fg(mut self, color: Rgba) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn with_bg(mut self, color: Rgba) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add `attrs` to the attributes already set.
    #[must_use]
    pub const fn with_attributes(mut self, attrs: TextAttributes) -> Self {
        self.attributes = self.attributes.union(attrs);
        self
    }

    #[must_use]
    pub const fn with_bold(self) -> Self {
        self.with_attributes(TextAttributes::BOLD)
    }

    /// Whether this is [`Style::NONE`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

//! Colorschemes: the style each [`Syntax`] category is drawn with.
//!
//! Lookups fall back to the [`Syntax::Default`] entry, so a scheme only has
//! to name the categories it wants to set apart.

use crate::color::Rgba;
use crate::highlight::syntax::Syntax;
use crate::style::Style;

/// Maps syntax categories to styles.
#[derive(Clone, Debug, Default)]
pub struct Colorscheme {
    name: String,
    styles: [Option<Style>; Syntax::COUNT],
}

impl Colorscheme {
    /// Create an empty colorscheme. Every lookup resolves to [`Style::NONE`]
    /// until styles are set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            styles: [None; Syntax::COUNT],
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve the style for a category.
    ///
    /// Falls back to the [`Syntax::Default`] style, then to an unstyled default.
    #[must_use]
    pub fn style(&self, syntax: Syntax) -> Style {
        self.styles[syntax.as_usize()]
            .or(self.styles[Syntax::Default.as_usize()])
            .unwrap_or(Style::NONE)
    }

    /// Style explicitly set for a category, without fallback.
    #[must_use]
    pub fn get(&self, syntax: Syntax) -> Option<Style> {
        self.styles[syntax.as_usize()]
    }

    /// Set a style for a category.
    pub fn set_style(&mut self, syntax: Syntax, style: Style) -> &mut Self {
        self.styles[syntax.as_usize()] = Some(style);
        self
    }

    /// Builder-style style setter.
    #[must_use]
    pub fn with_style(mut self, syntax: Syntax, style: Style) -> Self {
        self.set_style(syntax, style);
        self
    }

    /// The palette the editor ships with: light gray on black, with the
    /// classic terminal colors for each category.
    #[must_use]
    pub fn default_dark() -> Self {
        let on_black = |fg: Rgba| Style::fg(fg).with_bg(Rgba::BLACK);
        Self::new("default-dark")
            .with_style(Syntax::Default, on_black(Rgba::LIGHT_GRAY))
            .with_style(Syntax::Comment, on_black(Rgba::GRAY))
            .with_style(Syntax::String, on_black(Rgba::OLIVE))
            .with_style(Syntax::Keyword, on_black(Rgba::NAVY))
            .with_style(Syntax::Type, on_black(Rgba::PURPLE))
            .with_style(Syntax::Number, on_black(Rgba::FUCHSIA))
            .with_style(Syntax::Builtin, on_black(Rgba::BLUE))
            .with_style(Syntax::Special, on_black(Rgba::FUCHSIA))
    }
}

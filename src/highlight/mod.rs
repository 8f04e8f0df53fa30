//! Syntax highlighting: rule sets, colorschemes and the incremental highlighter.

mod colorscheme;
mod highlighter;
mod language;
pub mod languages;
mod syntax;


pub use colorscheme::Colorscheme;
pub use highlighter::{Highlighter, Match, SpanMatcher};
pub use language::{Language, LanguageBuilder, RegionKind, Rule, RuleId, RuleSpec, SpanPatterns};
pub use syntax::Syntax;

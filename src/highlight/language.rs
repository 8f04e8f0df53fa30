//! Language rule sets: patterns mapped to lexical categories.
//!
//! A [`Language`] is built once from [`RuleSpec`]s and is immutable afterwards.
//! Every pattern is compiled at build time, so a malformed rule is reported by
//! [`LanguageBuilder::build`] and never reaches the highlighter.
//!
//! # Examples
//!
//! ```
//! use qedit_core::highlight::{Language, RuleSpec, Syntax};
//!
//! let lang = Language::builder("Toy")
//!     .filetype(".toy")
//!     .rule(RuleSpec::keywords(&["if", "else"], Syntax::Keyword))
//!     .rule(RuleSpec::new(r"//.*", Syntax::Comment))
//!     .build()
//!     .unwrap();
//! assert_eq!(lang.rules().len(), 2);
//!
//! let bad = Language::builder("Bad").rule(RuleSpec::new("(", Syntax::Keyword)).build();
//! assert!(bad.is_err());
//! ```

use crate::error::{Error, Result};
use crate::highlight::syntax::Syntax;
use regex::Regex;
use std::collections::HashSet;

/// Stable identifier of a rule within its language.
///
/// Assigned in insertion order unless set explicitly with [`RuleSpec::with_id`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(u32);

impl RuleId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Uncompiled description of one rule.
#[derive(Clone, Debug)]
pub struct RuleSpec {
    start: String,
    end: Option<String>,
    skip: Option<String>,
    error: Option<String>,
    specials: Vec<String>,
    syntax: Syntax,
    id: Option<RuleId>,
}

impl RuleSpec {
    /// Rule whose matches of `start` are tagged with `syntax`.
    #[must_use]
    pub fn new(start: impl Into<String>, syntax: Syntax) -> Self {
        Self {
            start: start.into(),
            end: None,
            skip: None,
            error: None,
            specials: Vec::new(),
            syntax,
            id: None,
        }
    }

    /// Rule matching any of `words` as a whole word.
    ///
    /// A word boundary is only required at an end of a word that is a word
    /// character, so operators such as `c++` still match.
    #[must_use]
    pub fn keywords(words: &[&str], syntax: Syntax) -> Self {
        let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
        let alternatives: Vec<String> = words
            .iter()
            .map(|w| {
                let lead = if is_word(w.chars().next()) { r"\b" } else { "" };
                let trail = if is_word(w.chars().next_back()) { r"\b" } else { "" };
                format!("{lead}{}{trail}", regex::escape(w))
            })
            .collect();
        Self::new(format!("(?:{})", alternatives.join("|")), syntax)
    }

    /// End pattern. Anything but `"$"` makes this a multi-line region rule.
    #[must_use]
    pub fn end(mut self, pattern: impl Into<String>) -> Self {
        self.end = Some(pattern.into());
        self
    }

    /// Pattern skipped while looking for the end of a region (e.g. `\\"`).
    #[must_use]
    pub fn skip(mut self, pattern: impl Into<String>) -> Self {
        self.skip = Some(pattern.into());
        self
    }

    /// Pattern flagged as an error inside a region.
    #[must_use]
    pub fn error(mut self, pattern: impl Into<String>) -> Self {
        self.error = Some(pattern.into());
        self
    }

    /// Pattern highlighted specially inside a region (e.g. escapes).
    #[must_use]
    pub fn special(mut self, pattern: impl Into<String>) -> Self {
        self.specials.push(pattern.into());
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: RuleId) -> Self {
        self.id = Some(id);
        self
    }

    fn is_span(&self) -> bool {
        self.end.as_deref().is_some_and(|end| end != "$")
    }
}

/// Compiled patterns of a multi-line region rule.
#[derive(Clone, Debug)]
pub struct SpanPatterns {
    pub end: Regex,
    pub skip: Option<Regex>,
    pub error: Option<Regex>,
    pub specials: Vec<Regex>,
}

/// How far a rule's match may extend.
#[derive(Clone, Debug)]
pub enum RegionKind {
    /// Matches of the start pattern alone; they never cross a line break
    /// unless the pattern itself matches one.
    Line,
    /// Start/end delimited region that may span lines.
    Span(SpanPatterns),
}

/// A compiled highlighting rule.
#[derive(Clone, Debug)]
pub struct Rule {
    id: RuleId,
    start: Regex,
    region: RegionKind,
    syntax: Syntax,
}

impl Rule {
    #[must_use]
    pub fn id(&self) -> RuleId {
        self.id
    }

    #[must_use]
    pub fn start(&self) -> &Regex {
        &self.start
    }

    #[must_use]
    pub fn region(&self) -> &RegionKind {
        &self.region
    }

    #[must_use]
    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    /// Whether this rule needs multi-line matching.
    #[must_use]
    pub fn is_span(&self) -> bool {
        matches!(self.region, RegionKind::Span(_))
    }
}

/// A named, immutable set of highlighting rules.
#[derive(Clone, Debug)]
pub struct Language {
    name: String,
    filetypes: Vec<String>,
    rules: Vec<Rule>,
}

impl Language {
    /// Start building a language.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LanguageBuilder {
        LanguageBuilder {
            name: name.into(),
            filetypes: Vec::new(),
            specs: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File extensions associated with the language (e.g. `.go`).
    #[must_use]
    pub fn filetypes(&self) -> &[String] {
        &self.filetypes
    }

    /// Rules in the order they were added.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Look up a rule by id.
    #[must_use]
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }
}

/// Builder for [`Language`].
#[derive(Clone, Debug)]
pub struct LanguageBuilder {
    name: String,
    filetypes: Vec<String>,
    specs: Vec<RuleSpec>,
}

impl LanguageBuilder {
    #[must_use]
    pub fn filetype(mut self, ext: impl Into<String>) -> Self {
        self.filetypes.push(ext.into());
        self
    }

    #[must_use]
    pub fn rule(mut self, spec: RuleSpec) -> Self {
        self.specs.push(spec);
        self
    }

    #[must_use]
    pub fn rules(mut self, specs: impl IntoIterator<Item = RuleSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Compile every rule.
    ///
    /// Fails on the first pattern that does not compile, on a start pattern
    /// that matches the empty string, and on duplicate rule ids.
    pub fn build(self) -> Result<Language> {
        let mut seen = HashSet::with_capacity(self.specs.len());
        let mut rules = Vec::with_capacity(self.specs.len());

        for (idx, spec) in self.specs.into_iter().enumerate() {
            let id = spec.id.unwrap_or(RuleId(idx as u32));
            if !seen.insert(id) {
                return Err(Error::DuplicateRule(id));
            }

            let start = compile(&spec.start)?;
            if start.is_match("") {
                return Err(Error::EmptyMatchPattern {
                    pattern: spec.start,
                });
            }

            let region = if spec.is_span() {
                RegionKind::Span(SpanPatterns {
                    end: compile(spec.end.as_deref().unwrap_or("$"))?,
                    skip: spec.skip.as_deref().map(compile).transpose()?,
                    error: spec.error.as_deref().map(compile).transpose()?,
                    specials: spec
                        .specials
                        .iter()
                        .map(|p| compile(p))
                        .collect::<Result<_>>()?,
                })
            } else {
                if spec.skip.is_some() || spec.error.is_some() || !spec.specials.is_empty() {
                    tracing::debug!(
                        rule = id.get(),
                        "region patterns ignored on a single-line rule"
                    );
                }
                RegionKind::Line
            };

            rules.push(Rule {
                id,
                start,
                region,
                syntax: spec.syntax,
            });
        }

        tracing::debug!(language = %self.name, rules = rules.len(), "language built");
        Ok(Language {
            name: self.name,
            filetypes: self.filetypes,
            rules,
        })
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

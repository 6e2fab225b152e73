//! Owned stylesheet tree.
//!
//! Every pass over a stylesheet (usage filtering, merging, declaration
//! optimization) consumes a borrowed [`Stylesheet`] and builds a new one, so the
//! types here are plain data with cheap structural equality for tests.

use core::fmt;

/// Tokenizer location at the end of a construct.
///
/// `line` is zero-based and `column` one-based, as reported by `cssparser`.
/// Positions taken from the same parse are monotonic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    #[inline]
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "line {}, column {}", self.line + 1, self.column)
    }
}

/// A single `property: value` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name as written.
    pub property: String,
    /// Value text. An important declaration ends with a normalized `!important`.
    pub value: String,
    /// Whether the value carries `!important`.
    pub important: bool,
    /// Position of the last token of the value.
    pub end: SourcePosition,
}

impl Declaration {
    /// Build a declaration outside of a parse, deriving `important` from the value.
    #[must_use]
    pub fn new(property: &str, value: &str, end: SourcePosition) -> Self {
        let (head, important) = split_important(value);
        Self {
            property: property.trim().to_owned(),
            value: with_important(head, important),
            important,
            end,
        }
    }
}

const IMPORTANT: &str = "important";

/// Split a trailing `!important` marker off `value`.
///
/// The keyword is matched ASCII case-insensitively and blanks may sit between
/// it and the `!`. A final `;` is ignored.
#[must_use]
pub fn split_important(value: &str) -> (&str, bool) {
    let trimmed = value.trim().trim_end_matches(';').trim_end();
    let Some(keyword_start) = trimmed.len().checked_sub(IMPORTANT.len()) else {
        return (trimmed, false);
    };
    let (Some(head), Some(keyword)) = (trimmed.get(..keyword_start), trimmed.get(keyword_start..)) else {
        return (trimmed, false);
    };
    if !keyword.eq_ignore_ascii_case(IMPORTANT) {
        return (trimmed, false);
    }
    match head.trim_end().strip_suffix('!') {
        Some(rest) => (rest.trim_end(), true),
        None => (trimmed, false),
    }
}

#[must_use]
pub fn is_important_value(value: &str) -> bool {
    split_important(value).1
}

/// Stored form of a value: the important marker is always written `!important`.
pub(crate) fn with_important(head: &str, important: bool) -> String {
    if important {
        format!("{head}!{IMPORTANT}")
    } else {
        head.to_owned()
    }
}

/// A qualified rule: one or more selectors sharing a declaration block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleRule {
    /// Comma-separated members of the prelude, whitespace collapsed.
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
}

impl StyleRule {
    /// Selectors joined with `,`; two rules with the same key style the same elements.
    #[must_use]
    pub fn canonical_selectors(&self) -> String {
        self.selectors.join(",")
    }

    /// Ordering key used when deciding whether another rule comes later.
    #[inline]
    #[must_use]
    pub fn first_declaration_end(&self) -> Option<SourcePosition> {
        self.declarations.first().map(|declaration| declaration.end)
    }
}

/// Member of a `@media` or `@supports` block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NestedRule {
    Style(StyleRule),
    /// Nested at-rule, carried as raw text.
    Opaque(OpaqueRule),
}

impl NestedRule {
    #[inline]
    #[must_use]
    pub const fn as_style(&self) -> Option<&StyleRule> {
        match self {
            Self::Style(style) => Some(style),
            Self::Opaque(_) => None,
        }
    }
}

impl From<StyleRule> for NestedRule {
    fn from(rule: StyleRule) -> Self {
        Self::Style(rule)
    }
}

/// `@media <query> { ... }`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaRule {
    /// Query text with whitespace collapsed.
    pub query: String,
    pub rules: Vec<NestedRule>,
    /// Position of the last token inside the block.
    pub end: SourcePosition,
}

impl MediaRule {
    #[inline]
    #[must_use]
    pub fn canonical_query(&self) -> &str {
        &self.query
    }
}

/// `@supports <condition> { ... }`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SupportsRule {
    pub condition: String,
    pub rules: Vec<NestedRule>,
    pub end: SourcePosition,
}

/// `@import <target> [media];`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportRule {
    /// The url or string operand.
    pub target: String,
    /// Full prelude text, re-emitted verbatim.
    pub prelude: String,
    /// Position among the import rules of the owning stylesheet.
    pub insertion_index: usize,
}

/// Any at-rule the passes do not look into (`@font-face`, `@keyframes`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpaqueRule {
    /// At-keyword without the `@`.
    pub name: String,
    pub prelude: String,
    /// Raw block contents, `None` for statement at-rules.
    pub body: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TopLevelRule {
    Style(StyleRule),
    Media(MediaRule),
    Supports(SupportsRule),
    Import(ImportRule),
    Opaque(OpaqueRule),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Top-level rules in source order.
    pub rules: Vec<TopLevelRule>,
}

impl Stylesheet {
    #[inline]
    #[must_use]
    pub const fn new(rules: Vec<TopLevelRule>) -> Self {
        Self { rules }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Top-level style rules, skipping every at-rule.
    pub fn style_rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter().filter_map(|rule| match rule {
            TopLevelRule::Style(style) => Some(style),
            TopLevelRule::Media(_)
            | TopLevelRule::Supports(_)
            | TopLevelRule::Import(_)
            | TopLevelRule::Opaque(_) => None,
        })
    }
}

/// Collapse runs of whitespace to a single space and trim both ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! CSS Syntax Module Level 3: stylesheet parsing and serialization.
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
//!
//! Produces the owned rule tree the usage filter and the merger work on:
//! style rules, `@media` and `@supports` blocks with their nested rules,
//! `@import` statements, and every other at-rule kept as raw text.
//! Each declaration records where its value ended so later passes can tell
//! which of two rules came first.

mod error;
mod model;
mod parser;
mod serializer;

pub use error::{ParseFailure, SyntaxError};
pub use model::{
    Declaration, ImportRule, MediaRule, NestedRule, OpaqueRule, SourcePosition, StyleRule,
    Stylesheet, SupportsRule, TopLevelRule, is_important_value, split_important,
};
pub use parser::{parse_rule_slots, parse_stylesheet, parse_with_repair, repair_stylesheet};
pub use serializer::{SerializeOptions, serialize};

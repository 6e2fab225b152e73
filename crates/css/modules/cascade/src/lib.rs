//! Consolidation of a concatenated stylesheet.
//!
//! Two passes run after the rules of several sources have been parsed into one
//! tree. [`merge_rules`] folds rules that share a selector list (or a media
//! query) into the earliest of them, and [`optimize_stylesheet`] then keeps a
//! single declaration per property inside each rule.

#![forbid(unsafe_code)]

mod error;
mod merge;
mod optimize;
mod ordering;

pub use error::UnsupportedRule;
pub use merge::{merge_rules, merge_stylesheet};
pub use optimize::{optimize_media, optimize_rule, optimize_rules, optimize_stylesheet};
pub use ordering::OrderingMode;

//! Unused-CSS removal and stylesheet consolidation.
//!
//! [`filter_used_css`] keeps the rules of a stylesheet that match something
//! in a page. [`merge_and_optimize`] turns several stylesheets into one with
//! duplicate rules folded together and overridden declarations removed.
//! [`minify_css`] only rewrites a stylesheet in minified form.

mod consolidate;
mod error;
mod filter;
mod options;
mod usage;

pub use consolidate::merge_and_optimize;
pub use error::CssError;
pub use filter::filter_stylesheet;
pub use options::{ConsolidateOptions, UsageOptions};
pub use usage::{
    FilterOutcome, filter_used_css, filter_used_css_in, minify_css, try_filter_used_css,
    try_filter_used_css_in,
};

pub use css_cascade::OrderingMode;
pub use css_selectors::{WhitelistKind, WhitelistRule};

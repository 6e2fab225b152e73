//! Caller-facing switches for filtering and consolidation.

use css_cascade::OrderingMode;
use css_selectors::WhitelistRule;
use css_syntax::SerializeOptions;
use serde::Deserialize;

/// How unused rules are detected and how the result is written.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UsageOptions {
    /// Drop selectors with `::-moz`, `::-webkit` or `::-ms-` pseudo-elements.
    pub remove_vendor_pseudo_classes: bool,
    /// Selectors kept regardless of the document.
    pub whitelist: Vec<WhitelistRule>,
    pub minify_output: bool,
}

impl Default for UsageOptions {
    fn default() -> Self {
        Self {
            remove_vendor_pseudo_classes: false,
            whitelist: Vec::new(),
            minify_output: true,
        }
    }
}

impl UsageOptions {
    #[inline]
    #[must_use]
    pub const fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            minify: self.minify_output,
        }
    }
}

/// Settings for [`crate::merge_and_optimize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsolidateOptions {
    pub ordering: OrderingMode,
    pub minify: bool,
}

impl Default for ConsolidateOptions {
    fn default() -> Self {
        Self {
            ordering: OrderingMode::Legacy,
            minify: true,
        }
    }
}

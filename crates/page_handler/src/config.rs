//! Pipeline settings.
//!
//! Settings can be built programmatically or read from `SHAKER_*` environment
//! variables. The whitelist is never read from the environment; callers load it
//! separately and put it into [`PipelineOptions::usage`].

use std::env;

use css::{ConsolidateOptions, OrderingMode, UsageOptions};

/// Endpoint of the minification service used in CDN mode.
pub const DEFAULT_CDN_ENDPOINT: &str = "https://api.dotmaui.com/client/1.2/cssmin/";

/// Settings shared by every pipeline mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Usage filtering and output formatting.
    pub usage: UsageOptions,
    /// Read pages as served instead of rendering them in a headless browser.
    pub use_static_html: bool,
    /// In page-crawl mode, add a report with every result consolidated.
    pub merge_all: bool,
    /// Upload every result and record the public URL.
    pub cdn_mode: bool,
    pub api_key: Option<String>,
    pub cdn_endpoint: String,
    pub ordering: OrderingMode,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            usage: UsageOptions::default(),
            use_static_html: true,
            merge_all: false,
            cdn_mode: false,
            api_key: None,
            cdn_endpoint: DEFAULT_CDN_ENDPOINT.to_owned(),
            ordering: OrderingMode::Legacy,
        }
    }
}

impl PipelineOptions {
    /// Load options from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `SHAKER_STATIC_HTML`: Read pages without rendering them (default: enabled)
    /// - `SHAKER_MINIFY`: Minify the output (default: enabled)
    /// - `SHAKER_REMOVE_VENDOR`: Drop vendor pseudo-element selectors (default: disabled)
    /// - `SHAKER_MERGE_ALL`: Consolidate page-crawl results (default: disabled)
    /// - `SHAKER_CDN`: Upload results (default: disabled)
    /// - `SHAKER_API_KEY`: API key for uploads
    /// - `SHAKER_CDN_ENDPOINT`: Upload endpoint (default: [`DEFAULT_CDN_ENDPOINT`])
    /// - `SHAKER_FULL_ORDERING`: Order rules by line and column when merging (default: disabled)
    ///
    /// Flags accept `1`/`true` and `0`/`false`; anything else keeps the default.
    ///
    /// # Returns
    ///
    /// A new `PipelineOptions` instance populated from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// [`PipelineOptions::from_env`] over an arbitrary variable source.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |name: &str, default: bool| {
            match lookup(name).as_deref().map(str::trim) {
                Some(value) if value == "1" || value.eq_ignore_ascii_case("true") => true,
                Some(value) if value == "0" || value.eq_ignore_ascii_case("false") => false,
                _ => default,
            }
        };
        let text = |name: &str| lookup(name).map(|value| value.trim().to_owned()).filter(|value| !value.is_empty());

        Self {
            usage: UsageOptions {
                remove_vendor_pseudo_classes: flag(
                    "SHAKER_REMOVE_VENDOR",
                    defaults.usage.remove_vendor_pseudo_classes,
                ),
                minify_output: flag("SHAKER_MINIFY", defaults.usage.minify_output),
                whitelist: Vec::new(),
            },
            use_static_html: flag("SHAKER_STATIC_HTML", defaults.use_static_html),
            merge_all: flag("SHAKER_MERGE_ALL", defaults.merge_all),
            cdn_mode: flag("SHAKER_CDN", defaults.cdn_mode),
            api_key: text("SHAKER_API_KEY"),
            cdn_endpoint: text("SHAKER_CDN_ENDPOINT").unwrap_or(defaults.cdn_endpoint),
            ordering: if flag("SHAKER_FULL_ORDERING", false) {
                OrderingMode::Full
            } else {
                defaults.ordering
            },
        }
    }

    /// Settings for consolidating results with these options.
    #[inline]
    #[must_use]
    pub const fn consolidate_options(&self) -> ConsolidateOptions {
        ConsolidateOptions {
            ordering: self.ordering,
            minify: self.usage.minify_output,
        }
    }
}

//! Remove the CSS a page does not use.

use css_selectors::SelectorUsage;
use css_syntax::{SerializeOptions, parse_with_repair, serialize};
use html::Document;
use log::error;

use crate::error::CssError;
use crate::filter::filter_stylesheet;
use crate::options::UsageOptions;

/// Result of filtering one stylesheet inside a batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Filtered stylesheet, empty when it could not be parsed.
    pub css: String,
    pub parse_error: bool,
}

/// Filter `css` against the page `html`, recording failures instead of
/// returning them.
#[must_use]
pub fn filter_used_css(html: &str, css: &str, options: &UsageOptions) -> FilterOutcome {
    filter_used_css_in(&Document::parse(html), css, options)
}

/// [`filter_used_css`] against a page that is already parsed.
#[must_use]
pub fn filter_used_css_in(document: &Document, css: &str, options: &UsageOptions) -> FilterOutcome {
    match try_filter_used_css_in(document, css, options) {
        Ok(css) => FilterOutcome {
            css,
            parse_error: false,
        },
        Err(err) => {
            error!("Leaving stylesheet out: {err}");
            FilterOutcome {
                css: String::new(),
                parse_error: true,
            }
        }
    }
}

/// Filter `css` against the page `html`.
///
/// # Errors
/// Returns [`CssError::Parse`] when `css` cannot be parsed even with recovery.
pub fn try_filter_used_css(html: &str, css: &str, options: &UsageOptions) -> Result<String, CssError> {
    try_filter_used_css_in(&Document::parse(html), css, options)
}

/// [`try_filter_used_css`] against a page that is already parsed.
///
/// # Errors
/// Returns [`CssError::Parse`] when `css` cannot be parsed even with recovery.
pub fn try_filter_used_css_in(
    document: &Document,
    css: &str,
    options: &UsageOptions,
) -> Result<String, CssError> {
    let sheet = parse_with_repair(css)?;
    let usage = SelectorUsage {
        remove_vendor_pseudo_classes: options.remove_vendor_pseudo_classes,
        whitelist: &options.whitelist,
        ..SelectorUsage::new(document)
    };
    let filtered = filter_stylesheet(&sheet, &usage);
    Ok(serialize(&filtered, options.serialize_options()))
}

/// Reformat `css` without removing anything.
///
/// # Errors
/// Returns [`CssError::Parse`] when `css` cannot be parsed even with recovery.
pub fn minify_css(css: &str) -> Result<String, CssError> {
    let sheet = parse_with_repair(css)?;
    Ok(serialize(&sheet, SerializeOptions::MINIFIED))
}

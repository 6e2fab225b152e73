//! Decide whether a selector can apply to a document.

use html::Document;
use log::debug;

use crate::error::SelectorSyntaxError;
use crate::matching::document_matches;
use crate::pseudo::strip_pseudo_tokens;
use crate::whitelist::{WhitelistRule, is_whitelisted};

/// Prefixes of vendor pseudo-elements dropped when
/// [`SelectorUsage::remove_vendor_pseudo_classes`] is set.
pub const VENDOR_PSEUDO_PREFIXES: [&str; 3] = ["::-moz", "::-webkit", "::-ms-"];

/// Answers "does anything match this selector".
pub trait DocumentQuery {
    /// # Errors
    /// Returns [`SelectorSyntaxError`] when the selector cannot be parsed.
    fn matches_any(&self, selector: &str) -> Result<bool, SelectorSyntaxError>;
}

impl DocumentQuery for Document {
    fn matches_any(&self, selector: &str) -> Result<bool, SelectorSyntaxError> {
        document_matches(self, selector)
    }
}

/// Usage predicate over one document.
#[derive(Debug)]
pub struct SelectorUsage<'query, Q: ?Sized> {
    pub query: &'query Q,
    pub remove_vendor_pseudo_classes: bool,
    pub whitelist: &'query [WhitelistRule],
}

impl<'query, Q: DocumentQuery + ?Sized> SelectorUsage<'query, Q> {
    pub const fn new(query: &'query Q) -> Self {
        Self {
            query,
            remove_vendor_pseudo_classes: false,
            whitelist: &[],
        }
    }

    /// True when the rule owning `selector` should be kept.
    ///
    /// Errs on the side of keeping: selectors made only of pseudo tokens,
    /// whitelisted selectors and selectors the query cannot parse all count
    /// as used.
    pub fn is_used(&self, selector: &str) -> bool {
        if self.remove_vendor_pseudo_classes
            && VENDOR_PSEUDO_PREFIXES
                .iter()
                .any(|prefix| selector.contains(prefix))
        {
            debug!("Dropping vendor pseudo selector {selector}");
            return false;
        }

        let stripped = strip_pseudo_tokens(selector);
        if stripped.is_empty() || stripped.starts_with(':') {
            return true;
        }

        let mut candidate = stripped.trim().to_owned();
        if candidate.ends_with('>') {
            candidate.pop();
            candidate.pop();
        }

        if is_whitelisted(self.whitelist, selector) {
            debug!("Keeping whitelisted selector {selector}");
            return true;
        }

        match self.query.matches_any(&candidate) {
            Ok(found) => found,
            Err(err) => {
                debug!("Keeping selector the document query rejects: {err}");
                true
            }
        }
    }
}

//! Selectors Level 4: deciding which selectors are used by a page.
//! Spec: <https://www.w3.org/TR/selectors-4/>
//!
//! A selector counts as used when some element of the page matches it.
//! Matching goes through the `selectors` crate on a static
//! [`html::Document`]. Dynamic state (`:hover`, `:focus`, ...) and
//! pseudo-elements cannot be evaluated on a static tree, so they are removed
//! from the selector first; whatever still cannot be parsed is kept.

mod error;
pub mod matching;
mod pseudo;
mod usage;
mod whitelist;

pub use error::SelectorSyntaxError;
pub use matching::document_matches;
pub use pseudo::{EMPTY_FUNCTIONAL_TOKENS, PSEUDO_TOKENS, strip_pseudo_tokens};
pub use usage::{DocumentQuery, SelectorUsage, VENDOR_PSEUDO_PREFIXES};
pub use whitelist::{WhitelistKind, WhitelistRule, is_whitelisted};

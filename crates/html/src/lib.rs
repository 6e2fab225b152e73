#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

//! Static HTML documents for selector queries.
//!
//! A page is parsed once with html5ever and copied into an `indextree`
//! arena. Nothing mutates it afterwards; the CSS side only walks elements
//! and reads tag names and attributes.

pub mod dom;
pub mod parser;
pub mod stylesheets;

pub use dom::{DOMNode, Document, NodeKind};
pub use parser::parse_html;
pub use stylesheets::{StylesheetRef, extract_stylesheet_refs};

//! html5ever front end.
//!
//! The page is parsed into an `RcDom` and then copied into the arena; the
//! reference-counted tree is dropped as soon as the copy is done.

use html5ever::tendril::TendrilSink as _;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{ParseOpts, parse_document};
use indextree::NodeId;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use smallvec::SmallVec;

use crate::dom::{DOMNode, Document};

fn walk_tree(handle: &Handle, parent: NodeId, document: &mut Document) {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let attrs: SmallVec<(String, String), 4> = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            let id = document.append(parent, DOMNode::element(&name.local, attrs));
            for child in handle.children.borrow().iter() {
                walk_tree(child, id, document);
            }
        }
        NodeData::Text { contents } => {
            let text = contents.borrow();
            document.append(parent, DOMNode::text(&text));
        }
        NodeData::Document => {
            for child in handle.children.borrow().iter() {
                walk_tree(child, parent, document);
            }
        }
        NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => {}
    }
}

/// Parse an HTML string into a [`Document`].
///
/// Scripting is treated as disabled, so `<noscript>` content is parsed as
/// markup and its elements take part in selector matching.
pub fn parse_html(html: &str) -> Document {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            exact_errors: false,
            scripting_enabled: false,
            ..TreeBuilderOpts::default()
        },
        ..ParseOpts::default()
    };
    let dom = parse_document(RcDom::default(), opts).one(html);
    let mut document = Document::new();
    let root = document.root();
    walk_tree(&dom.document, root, &mut document);
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implied_structure_is_present() {
        let document = parse_html("<p class='a'>hi");
        let tags: Vec<&str> = document
            .elements()
            .filter_map(|id| document.node(id)?.tag())
            .collect();
        assert_eq!(tags, ["html", "head", "body", "p"]);
    }

    #[test]
    fn attributes_are_kept() {
        let document = parse_html(r#"<div id="main" class="x y"></div>"#);
        let div = document
            .elements()
            .find(|&id| document.node(id).and_then(DOMNode::tag) == Some("div"));
        let attrs = div.and_then(|id| document.node(id)).map(|node| node.attr("class"));
        assert_eq!(attrs, Some(Some("x y")));
    }
}

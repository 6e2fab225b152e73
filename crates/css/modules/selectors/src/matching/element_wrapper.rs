//! Wrapper that implements the selectors crate's Element trait for our DOM.

use core::fmt;

use html::{DOMNode, Document, NodeKind};
use html5ever::Namespace;
use indextree::NodeId;
use selectors::OpaqueElement;
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::matching::{ElementSelectorFlags, MatchingContext};

use super::{CssLocalName, CssString, NonTSPseudoClass, PseudoElement, SelectorImpl};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// An element of a [`Document`], borrowed for the duration of a match.
#[derive(Clone, Copy)]
pub struct ElementWrapper<'doc> {
    document: &'doc Document,
    id: NodeId,
    node: &'doc DOMNode,
}

impl fmt::Debug for ElementWrapper<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ElementWrapper")
            .field("id", &self.id)
            .field("tag", &self.tag())
            .finish_non_exhaustive()
    }
}

impl<'doc> ElementWrapper<'doc> {
    /// `None` unless `id` names an element of `document`.
    pub fn new(document: &'doc Document, id: NodeId) -> Option<Self> {
        let node = document.node(id).filter(|node| node.is_element())?;
        Some(Self { document, id, node })
    }

    fn tag(&self) -> &str {
        self.node.tag().unwrap_or_default()
    }

    fn wrap(&self, id: Option<NodeId>) -> Option<Self> {
        Self::new(self.document, id?)
    }

    fn class_matches(&self, name: &str, case_sensitivity: CaseSensitivity) -> bool {
        self.node.attr("class").is_some_and(|classes| {
            classes
                .split_ascii_whitespace()
                .any(|class| case_sensitivity.eq(class.as_bytes(), name.as_bytes()))
        })
    }
}

impl selectors::Element for ElementWrapper<'_> {
    type Impl = SelectorImpl;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self.node)
    }

    fn parent_element(&self) -> Option<Self> {
        self.wrap(self.document.parent_element(self.id))
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        self.wrap(self.document.previous_element_sibling(self.id))
    }

    fn next_sibling_element(&self) -> Option<Self> {
        self.wrap(self.document.next_element_sibling(self.id))
    }

    fn first_element_child(&self) -> Option<Self> {
        self.wrap(self.document.first_element_child(self.id))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        true
    }

    fn has_local_name(&self, local_name: &CssLocalName) -> bool {
        self.tag() == &*local_name.0
    }

    fn has_namespace(&self, namespace: &Namespace) -> bool {
        &**namespace == HTML_NAMESPACE
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.tag() == other.tag()
    }

    fn attr_matches(
        &self,
        namespace: &NamespaceConstraint<&Namespace>,
        local_name: &CssLocalName,
        operation: &AttrSelectorOperation<&CssString>,
    ) -> bool {
        if let NamespaceConstraint::Specific(url) = namespace
            && !url.is_empty()
        {
            return false;
        }
        self.node
            .attrs
            .iter()
            .any(|(name, value)| name.as_str() == &*local_name.0 && operation.eval_str(value))
    }

    fn match_non_ts_pseudo_class(
        &self,
        pseudo_class: &NonTSPseudoClass,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match *pseudo_class {}
    }

    fn match_pseudo_element(
        &self,
        pseudo_element: &PseudoElement,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match *pseudo_element {}
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn is_link(&self) -> bool {
        matches!(self.tag(), "a" | "area" | "link") && self.node.attr("href").is_some()
    }

    fn is_html_slot_element(&self) -> bool {
        self.tag() == "slot"
    }

    fn has_id(&self, id: &CssLocalName, case_sensitivity: CaseSensitivity) -> bool {
        self.node
            .attr("id")
            .is_some_and(|own| case_sensitivity.eq(own.as_bytes(), id.0.as_bytes()))
    }

    fn has_class(&self, name: &CssLocalName, case_sensitivity: CaseSensitivity) -> bool {
        self.class_matches(&name.0, case_sensitivity)
    }

    fn imported_part(&self, _name: &CssLocalName) -> Option<CssLocalName> {
        None
    }

    fn is_part(&self, _name: &CssLocalName) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        self.document.children(self.id).all(|child| {
            match self.document.node(child).map(|node| &node.kind) {
                Some(NodeKind::Element { .. }) => false,
                Some(NodeKind::Text { text }) => text.is_empty(),
                Some(NodeKind::Document) | None => true,
            }
        })
    }

    fn is_root(&self) -> bool {
        self.document.parent_element(self.id).is_none()
    }
}

use indextree::{Arena, NodeId};
use smallvec::SmallVec;

use crate::parser::parse_html;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeKind {
    #[default]
    Document,
    /// Tag name, lowercased by the HTML tokenizer.
    Element { tag: String },
    Text { text: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMNode {
    pub kind: NodeKind,
    pub attrs: SmallVec<(String, String), 4>,
}

impl DOMNode {
    #[inline]
    pub fn element(tag: &str, attrs: SmallVec<(String, String), 4>) -> Self {
        Self {
            kind: NodeKind::Element {
                tag: tag.to_owned(),
            },
            attrs,
        }
    }

    #[inline]
    pub fn text(text: &str) -> Self {
        Self {
            kind: NodeKind::Text {
                text: text.to_owned(),
            },
            attrs: SmallVec::new(),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag } => Some(tag),
            NodeKind::Document | NodeKind::Text { .. } => None,
        }
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    /// First attribute named `name` (names are lowercased by the parser).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A parsed page: an arena of nodes under a single document root.
#[derive(Clone, Debug)]
pub struct Document {
    dom: Arena<DOMNode>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut dom = Arena::new();
        Self {
            root: dom.new_node(DOMNode::default()),
            dom,
        }
    }

    /// Parse an HTML string. html5ever recovers from every error, so this
    /// cannot fail.
    pub fn parse(html: &str) -> Self {
        parse_html(html)
    }

    #[inline]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn append(&mut self, parent: NodeId, node: DOMNode) -> NodeId {
        let id = self.dom.new_node(node);
        parent.append(id, &mut self.dom);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&DOMNode> {
        self.dom.get(id).map(|node| node.get())
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.dom)
    }

    fn is_element(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(DOMNode::is_element)
    }

    /// Every element in document order.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.root
            .descendants(&self.dom)
            .filter(|&id| self.is_element(id))
    }

    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        id.ancestors(&self.dom)
            .skip(1)
            .find(|&ancestor| self.is_element(ancestor))
    }

    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        id.preceding_siblings(&self.dom)
            .skip(1)
            .find(|&sibling| self.is_element(sibling))
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        id.following_siblings(&self.dom)
            .skip(1)
            .find(|&sibling| self.is_element(sibling))
    }

    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).find(|&child| self.is_element(child))
    }
}

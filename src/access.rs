use indextree::NodeEdge as IndexTreeNodeEdge;

use crate::document::{Document, Node};
use crate::xmlvalue::{Element, Value, ValueType};

/// Node edges.
///
/// Used by [`Document::traverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeEdge {
    /// The start edge of a node. In case of an element
    /// this is the start tag. In case of root
    /// the start of the document.
    Start(Node),
    /// The end edge of a node. In case of an element
    /// this is the end tag. For any other values, the
    /// end edge occurs immediately after the start
    /// edge.
    End(Node),
}

/// ## Read-only access
impl Document {
    /// Get parent node.
    ///
    /// Returns [`None`] if this is the root node or if the node is unattached.
    pub fn parent(&self, node: Node) -> Option<Node> {
        self.arena[node.get()].parent().map(Node::new)
    }

    /// Get first child.
    ///
    /// Returns [`None`] if there are no children.
    pub fn first_child(&self, node: Node) -> Option<Node> {
        self.arena[node.get()].first_child().map(Node::new)
    }

    /// Get last child.
    ///
    /// Returns [`None`] if there are no children.
    pub fn last_child(&self, node: Node) -> Option<Node> {
        self.arena[node.get()].last_child().map(Node::new)
    }

    /// Get next sibling.
    pub fn next_sibling(&self, node: Node) -> Option<Node> {
        self.arena[node.get()].next_sibling().map(Node::new)
    }

    /// Get previous sibling.
    pub fn previous_sibling(&self, node: Node) -> Option<Node> {
        self.arena[node.get()].previous_sibling().map(Node::new)
    }

    /// Iterator over the child nodes of this node.
    pub fn children(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get().children(&self.arena).map(Node::new)
    }

    /// Iterator over ancestor nodes, including this one.
    pub fn ancestors(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get().ancestors(&self.arena).map(Node::new)
    }

    /// Iterator over this node and its descendants, in document order.
    pub fn descendants(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get().descendants(&self.arena).map(Node::new)
    }

    /// Iterator over all elements under `node` (including `node` itself if
    /// it is an element), in document order.
    pub fn elements(&self, node: Node) -> impl Iterator<Item = (Node, &Element)> + '_ {
        self.descendants(node)
            .filter_map(|n| self.element(n).map(|element| (n, element)))
    }

    /// Traverse over node edges.
    ///
    /// This can be used to traverse the nodes in document order, for
    /// instance to copy or serialize the document.
    ///
    /// Each element has a start and an end edge; all other values have a
    /// start edge immediately followed by an end edge.
    pub fn traverse(&self, node: Node) -> impl Iterator<Item = NodeEdge> + '_ {
        node.get().traverse(&self.arena).map(|edge| match edge {
            IndexTreeNodeEdge::Start(node_id) => NodeEdge::Start(Node::new(node_id)),
            IndexTreeNodeEdge::End(node_id) => NodeEdge::End(Node::new(node_id)),
        })
    }

    /// Whether the node is a child of the document root.
    pub fn is_top_level(&self, node: Node) -> bool {
        self.parent(node) == Some(self.root)
    }

    /// Whether any child of the node is text or CDATA.
    pub fn has_text_child(&self, node: Node) -> bool {
        self.children(node)
            .any(|child| matches!(self.value_type(child), ValueType::Text | ValueType::Cdata))
    }

    /// The text of a text node.
    pub fn text_str(&self, node: Node) -> Option<&str> {
        match self.value(node) {
            Value::Text(text) => Some(text.get()),
            _ => None,
        }
    }
}

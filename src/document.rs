use indextree::{Arena, NodeId};

use crate::error::{Error, Result};
use crate::name::{Name, NameId, NameLookup};
use crate::xmlvalue::{Element, Value, ValueType};

pub(crate) type XmlArena = Arena<Value>;

/// A node in a [`Document`].
/// This is a lightweight value and can be copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node(NodeId);

impl Node {
    #[inline]
    pub(crate) fn new(node_id: NodeId) -> Self {
        Node(node_id)
    }

    #[inline]
    pub(crate) fn get(&self) -> NodeId {
        self.0
    }
}

/// The XML declaration, `<?xml version="1.0" encoding="utf-8"?>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<bool>,
}

/// A parsed, well-formed XML document.
///
/// Every element and attribute name has been resolved to its namespace
/// URI during parsing, so the document can be matched by namespace without
/// tracking scopes again.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) arena: XmlArena,
    pub(crate) name_lookup: NameLookup,
    pub(crate) root: Node,
    pub(crate) declaration: Option<Declaration>,
}

impl Document {
    pub(crate) fn new(declaration: Option<Declaration>) -> Self {
        Self::with_names(NameLookup::new(), declaration)
    }

    pub(crate) fn with_names(name_lookup: NameLookup, declaration: Option<Declaration>) -> Self {
        let mut arena = XmlArena::new();
        let root = Node::new(arena.new_node(Value::Root));
        Document {
            arena,
            name_lookup,
            root,
            declaration,
        }
    }

    /// An empty document that shares this document's names and declaration,
    /// so nodes can be copied over with their name ids intact.
    pub(crate) fn empty_like(&self) -> Self {
        Self::with_names(self.name_lookup.clone(), self.declaration.clone())
    }

    /// The document root. This holds the document element as well as any
    /// comments, processing instructions and doctype outside of it.
    pub fn root(&self) -> Node {
        self.root
    }

    /// The XML declaration, if the document has one.
    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    pub(crate) fn declaration_mut(&mut self) -> Option<&mut Declaration> {
        self.declaration.as_mut()
    }

    /// The single top-level element.
    pub fn document_element(&self) -> Result<Node> {
        self.children(self.root)
            .find(|child| self.value_type(*child) == ValueType::Element)
            .ok_or(Error::NoDocumentElement)
    }

    /// The local name of the document element, without its prefix.
    pub fn root_element_name(&self) -> Result<&str> {
        let document_element = self.document_element()?;
        let element = self
            .element(document_element)
            .ok_or(Error::NoDocumentElement)?;
        Ok(self.name(element.name()).local())
    }

    #[inline]
    pub fn value(&self, node: Node) -> &Value {
        self.arena[node.get()].get()
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, node: Node) -> &mut Value {
        self.arena[node.get()].get_mut()
    }

    #[inline]
    pub fn value_type(&self, node: Node) -> ValueType {
        self.value(node).value_type()
    }

    /// The element value of a node, if it is an element.
    pub fn element(&self, node: Node) -> Option<&Element> {
        match self.value(node) {
            Value::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node: Node) -> Option<&mut Element> {
        match self.value_mut(node) {
            Value::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Look up a name by id.
    #[inline]
    pub fn name(&self, name_id: NameId) -> &Name {
        self.name_lookup.get_value(name_id)
    }

    pub(crate) fn add_name(&mut self, prefix: &str, local: &str, namespace: &str) -> NameId {
        self.name_lookup
            .get_id_mut(Name::new(prefix, local, namespace))
    }
}

use crate::document::{Document, Node};
use crate::error::Error;
use crate::xmlvalue::{Value, ValueType};

/// Manipulation of the tree structure.
///
/// This maintains an XML structure:
/// - There is only one document element under the root node.
/// - The only other nodes that can exist directly under the root node are
///   comments, processing instructions and the doctype.
///
/// It also ensures that text nodes are consolidated:
/// two text nodes never appear consecutively. If you
/// append a text node after another text node,
/// the text is appended to the existing text node.
impl Document {
    /// Append a child to the end of the children of the given parent.
    pub(crate) fn append(&mut self, parent: Node, child: Node) -> Result<(), Error> {
        self.add_structure_check(parent, child)?;
        if self.add_consolidate_text_nodes(child, self.last_child(parent)) {
            return Ok(());
        }
        parent.get().append(child.get(), &mut self.arena);
        Ok(())
    }

    fn add_structure_check(&self, parent: Node, child: Node) -> Result<(), Error> {
        if parent != self.root {
            return Ok(());
        }
        match self.value_type(child) {
            ValueType::Element => {
                if self.document_element().is_ok() {
                    return Err(Error::MultipleDocumentElements);
                }
            }
            ValueType::Text | ValueType::Cdata => {
                return Err(Error::TextOutsideDocumentElement);
            }
            ValueType::Root
            | ValueType::Comment
            | ValueType::ProcessingInstruction
            | ValueType::Doctype => {
                // these can exist at the top level
            }
        }
        Ok(())
    }

    fn add_consolidate_text_nodes(&mut self, node: Node, prev_node: Option<Node>) -> bool {
        let added_text = match self.value(node) {
            Value::Text(text) => text.get().to_string(),
            _ => return false,
        };
        let Some(prev_node) = prev_node else {
            return false;
        };
        if let Value::Text(prev) = self.value_mut(prev_node) {
            prev.push_str(&added_text);
            // the node we wanted to insert is now consolidated
            node.get().remove(&mut self.arena);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_consolidates_text() {
        let mut document = Document::new(None);
        let name = document.add_name("", "a", "");
        let a = document.new_element(name);
        let root = document.root();
        document.append(root, a).unwrap();
        let first = document.new_text("Hello ");
        let second = document.new_text("world");
        document.append(a, first).unwrap();
        document.append(a, second).unwrap();
        assert_eq!(document.children(a).count(), 1);
        assert_eq!(document.text_str(first), Some("Hello world"));
    }

    #[test]
    fn test_second_document_element_rejected() {
        let mut document = Document::new(None);
        let name = document.add_name("", "a", "");
        let root = document.root();
        let a = document.new_element(name);
        document.append(root, a).unwrap();
        let b = document.new_element(name);
        assert!(matches!(
            document.append(root, b),
            Err(Error::MultipleDocumentElements)
        ));
    }

    #[test]
    fn test_text_under_root_rejected() {
        let mut document = Document::new(None);
        let root = document.root();
        let text = document.new_text("loose");
        assert!(matches!(
            document.append(root, text),
            Err(Error::TextOutsideDocumentElement)
        ));
    }
}

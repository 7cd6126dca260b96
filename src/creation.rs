use crate::document::{Document, Node};
use crate::name::NameId;
use crate::xmlvalue::{Comment, Element, ProcessingInstruction, Text, Value};

/// Creation of unattached nodes; attach them with
/// [`Document::append`](crate::Document).
impl Document {
    pub(crate) fn new_node(&mut self, value: Value) -> Node {
        Node::new(self.arena.new_node(value))
    }

    pub(crate) fn new_text(&mut self, text: &str) -> Node {
        self.new_node(Value::Text(Text::new(text.to_string())))
    }

    pub(crate) fn new_cdata(&mut self, text: &str) -> Node {
        self.new_node(Value::Cdata(Text::new(text.to_string())))
    }

    pub(crate) fn new_element(&mut self, name_id: NameId) -> Node {
        self.new_node(Value::Element(Element::new(name_id)))
    }

    pub(crate) fn new_comment(&mut self, comment: &str) -> Node {
        self.new_node(Value::Comment(Comment::new(comment.to_string())))
    }

    pub(crate) fn new_processing_instruction(&mut self, target: &str, data: Option<&str>) -> Node {
        self.new_node(Value::ProcessingInstruction(ProcessingInstruction::new(
            target.to_string(),
            data.map(|s| s.to_string()),
        )))
    }

    pub(crate) fn new_doctype(&mut self, source: &str) -> Node {
        self.new_node(Value::Doctype(source.to_string()))
    }
}

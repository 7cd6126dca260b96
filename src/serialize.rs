use std::fmt::{Display, Formatter};

use crate::access::NodeEdge;
use crate::document::{Document, Node};
use crate::entity::{serialize_attribute, serialize_text};
use crate::name::XML_NAMESPACE;
use crate::xmlvalue::{Element, Value};

/// How the children of an open element are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Each child on its own, indented line.
    Block,
    /// Children written as they are.
    Inline,
}

/// Serialization options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SerializeOptions {
    /// Indent nested elements with this many spaces per level. `None`
    /// writes the document without adding any whitespace.
    pub indent: Option<usize>,
}

pub(crate) struct Serializer<'a> {
    document: &'a Document,
    options: SerializeOptions,
    stack: Vec<Layout>,
}

impl<'a> Serializer<'a> {
    pub(crate) fn new(document: &'a Document, options: SerializeOptions) -> Self {
        Serializer {
            document,
            options,
            stack: Vec::new(),
        }
    }

    pub(crate) fn serialize(mut self) -> String {
        let mut out = String::new();
        let mut top_level_written = false;
        if let Some(declaration) = self.document.declaration() {
            out.push_str("<?xml version=\"");
            out.push_str(&declaration.version);
            out.push('"');
            if let Some(encoding) = &declaration.encoding {
                out.push_str(" encoding=\"");
                out.push_str(encoding);
                out.push('"');
            }
            if let Some(standalone) = declaration.standalone {
                out.push_str(if standalone {
                    " standalone=\"yes\""
                } else {
                    " standalone=\"no\""
                });
            }
            out.push_str("?>");
            top_level_written = true;
        }

        let root = self.document.root();
        for edge in self.document.traverse(root) {
            match edge {
                NodeEdge::Start(node) => {
                    if node == root || self.is_skipped(node) {
                        continue;
                    }
                    if self.document.is_top_level(node) {
                        if top_level_written {
                            out.push('\n');
                        }
                        top_level_written = true;
                    } else if self.stack.last() == Some(&Layout::Block) {
                        self.newline(&mut out, self.stack.len());
                    }
                    self.start(&mut out, node);
                }
                NodeEdge::End(node) => {
                    if node == root || self.is_skipped(node) {
                        continue;
                    }
                    self.end(&mut out, node);
                }
            }
        }
        if self.options.indent.is_some() {
            out.push('\n');
        }
        out
    }

    fn newline(&self, out: &mut String, depth: usize) {
        out.push('\n');
        if let Some(spaces) = self.options.indent {
            out.push_str(&" ".repeat(spaces * depth));
        }
    }

    /// Whitespace-only text between block laid out children is dropped
    /// when indenting; the indentation replaces it.
    fn is_skipped(&self, node: Node) -> bool {
        if self.options.indent.is_none() {
            return false;
        }
        let Some(text) = self.document.text_str(node) else {
            return false;
        };
        if !text.trim().is_empty() {
            return false;
        }
        self.document
            .parent(node)
            .map(|parent| self.layout(parent) == Layout::Block)
            .unwrap_or(false)
    }

    fn layout(&self, node: Node) -> Layout {
        if self.options.indent.is_none() {
            return Layout::Inline;
        }
        for ancestor in self.document.ancestors(node) {
            let Some(element) = self.document.element(ancestor) else {
                continue;
            };
            if self.is_space_preserved(element) {
                return Layout::Inline;
            }
            if self.has_significant_text(ancestor) {
                return Layout::Inline;
            }
        }
        Layout::Block
    }

    fn is_space_preserved(&self, element: &Element) -> bool {
        element.attributes().iter().any(|(name_id, value)| {
            let name = self.document.name(*name_id);
            name.namespace() == XML_NAMESPACE && name.local() == "space" && value == "preserve"
        })
    }

    fn has_significant_text(&self, node: Node) -> bool {
        self.document.children(node).any(|child| match self.document.value(child) {
            Value::Text(text) => !text.get().trim().is_empty(),
            Value::Cdata(_) => true,
            _ => false,
        })
    }

    fn has_content(&self, node: Node) -> bool {
        self.document
            .children(node)
            .any(|child| !self.is_skipped(child))
    }

    fn start(&mut self, out: &mut String, node: Node) {
        match self.document.value(node) {
            Value::Root => {}
            Value::Element(element) => {
                out.push('<');
                out.push_str(&self.document.name(element.name()).qualified());
                for (prefix, uri) in element.declarations() {
                    if prefix.is_empty() {
                        out.push_str(" xmlns=\"");
                    } else {
                        out.push_str(" xmlns:");
                        out.push_str(prefix);
                        out.push_str("=\"");
                    }
                    out.push_str(&serialize_attribute(uri));
                    out.push('"');
                }
                for (name_id, value) in element.attributes() {
                    out.push(' ');
                    out.push_str(&self.document.name(*name_id).qualified());
                    out.push_str("=\"");
                    out.push_str(&serialize_attribute(value));
                    out.push('"');
                }
                if self.has_content(node) {
                    out.push('>');
                    let layout = self.layout(node);
                    self.stack.push(layout);
                } else {
                    out.push_str("/>");
                }
            }
            Value::Text(text) => out.push_str(&serialize_text(text.get())),
            Value::Cdata(text) => {
                out.push_str("<![CDATA[");
                out.push_str(text.get());
                out.push_str("]]>");
            }
            Value::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment.get());
                out.push_str("-->");
            }
            Value::ProcessingInstruction(pi) => {
                out.push_str("<?");
                out.push_str(pi.target());
                if let Some(data) = pi.data() {
                    out.push(' ');
                    out.push_str(data);
                }
                out.push_str("?>");
            }
            Value::Doctype(source) => out.push_str(source),
        }
    }

    fn end(&mut self, out: &mut String, node: Node) {
        let Some(element) = self.document.element(node) else {
            return;
        };
        if !self.has_content(node) {
            return;
        }
        if self.stack.pop() == Some(Layout::Block) {
            self.newline(out, self.stack.len());
        }
        out.push_str("</");
        out.push_str(&self.document.name(element.name()).qualified());
        out.push('>');
    }
}

impl Document {
    /// Serialize the document to a string, without adding any whitespace.
    pub fn to_xml_string(&self) -> String {
        self.serialize_with(SerializeOptions::default())
    }

    /// Serialize the document using the given options.
    pub fn serialize_with(&self, options: SerializeOptions) -> String {
        Serializer::new(self, options).serialize()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_xml_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use rstest::rstest;

    #[rstest]
    #[case(r#"<a xmlns:x="urn:x"><x:b/><!--c--><d x:attr="1"/></a>"#)]
    #[case(r#"<a>Hello <em>world</em>!</a>"#)]
    #[case(r#"<a b="&quot;&lt;&amp;">&lt;&amp;&gt;</a>"#)]
    #[case("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<a/>")]
    #[case(r#"<a><![CDATA[<raw> & stuff]]></a>"#)]
    #[case(r#"<a><?pi data?><?empty?></a>"#)]
    fn test_roundtrip(#[case] xml: &str) {
        let document = Document::parse(xml).unwrap();
        assert_eq!(document.to_xml_string(), xml);
    }

    #[test]
    fn test_empty_element_collapses() {
        let document = Document::parse("<a><b></b></a>").unwrap();
        assert_eq!(document.to_xml_string(), "<a><b/></a>");
    }

    #[test]
    fn test_top_level_nodes_on_own_line() {
        let document =
            Document::parse("<?xml version=\"1.0\"?>\n<!--top--><a/><?after?>").unwrap();
        assert_eq!(
            document.to_xml_string(),
            "<?xml version=\"1.0\"?>\n<!--top-->\n<a/>\n<?after?>"
        );
    }

    #[test]
    fn test_indent() {
        let document =
            Document::parse("<a>\n  <b><c/></b>\n  <!--note-->\n  <d>text <e/></d>\n</a>").unwrap();
        let output = document.serialize_with(SerializeOptions { indent: Some(2) });
        assert_snapshot!(output.trim_end(), @r###"
        <a>
          <b>
            <c/>
          </b>
          <!--note-->
          <d>text <e/></d>
        </a>
        "###);
    }

    #[test]
    fn test_indent_preserve_space() {
        let document =
            Document::parse(r#"<a><b xml:space="preserve"> <c/> </b></a>"#).unwrap();
        let output = document.serialize_with(SerializeOptions { indent: Some(4) });
        assert_eq!(
            output,
            "<a>\n    <b xml:space=\"preserve\"> <c/> </b>\n</a>\n"
        );
    }
}

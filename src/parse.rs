use std::str::FromStr;

use xmlparser::{ElementEnd, Token, Tokenizer};

use crate::document::{Declaration, Document, Node};
use crate::entity::{normalize_line_endings, parse_attribute, parse_predefined_entities};
use crate::error::{Error, Result};
use crate::name::XML_NAMESPACE;
use crate::xmlvalue::{Attributes, Declarations};

struct PendingElement<'a> {
    prefix: &'a str,
    local: &'a str,
    declarations: Declarations,
    attributes: Vec<(&'a str, &'a str, String)>,
}

struct OpenElement<'a> {
    node: Node,
    prefix: &'a str,
    local: &'a str,
}

impl OpenElement<'_> {
    fn qualified(&self) -> String {
        qualified(self.prefix, self.local)
    }
}

fn qualified(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_string()
    } else {
        format!("{}:{}", prefix, local)
    }
}

struct DocumentBuilder<'a> {
    xml: &'a str,
    document: Document,
    scopes: Vec<Declarations>,
    open: Vec<OpenElement<'a>>,
    pending: Option<PendingElement<'a>>,
    doctype_start: Option<usize>,
}

impl<'a> DocumentBuilder<'a> {
    fn new(xml: &'a str) -> Self {
        DocumentBuilder {
            xml,
            document: Document::new(None),
            scopes: Vec::new(),
            open: Vec::new(),
            pending: None,
            doctype_start: None,
        }
    }

    fn parent(&self) -> Node {
        self.open
            .last()
            .map(|open| open.node)
            .unwrap_or(self.document.root())
    }

    fn add(&mut self, node: Node) -> Result<()> {
        let parent = self.parent();
        self.document.append(parent, node)
    }

    fn declaration(&mut self, version: &str, encoding: Option<&str>, standalone: Option<bool>) {
        self.document.declaration = Some(Declaration {
            version: version.to_string(),
            encoding: encoding.map(|s| s.to_string()),
            standalone,
        });
    }

    fn element_start(&mut self, prefix: &'a str, local: &'a str) {
        self.pending = Some(PendingElement {
            prefix,
            local,
            declarations: Declarations::new(),
            attributes: Vec::new(),
        });
    }

    fn attribute(&mut self, prefix: &'a str, local: &'a str, value: &'a str) -> Result<()> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(());
        };
        let value = parse_attribute(value)?.into_owned();
        if prefix == "xmlns" {
            if value.is_empty() {
                return Err(Error::EmptyNamespace(local.to_string()));
            }
            if pending.declarations.iter().any(|(p, _)| p == local) {
                return Err(Error::DuplicateAttribute(qualified(prefix, local)));
            }
            pending.declarations.push((local.to_string(), value));
        } else if prefix.is_empty() && local == "xmlns" {
            if pending.declarations.iter().any(|(p, _)| p.is_empty()) {
                return Err(Error::DuplicateAttribute(local.to_string()));
            }
            pending.declarations.push((String::new(), value));
        } else {
            if pending
                .attributes
                .iter()
                .any(|(p, l, _)| *p == prefix && *l == local)
            {
                return Err(Error::DuplicateAttribute(qualified(prefix, local)));
            }
            pending.attributes.push((prefix, local, value));
        }
        Ok(())
    }

    /// Resolve a prefix against the declarations in scope. The empty prefix
    /// resolves to the default namespace, or to no namespace at all.
    fn resolve(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE);
        }
        let found = self.scopes.iter().rev().find_map(|declarations| {
            declarations
                .iter()
                .find(|(p, _)| p == prefix)
                .map(|(_, uri)| uri.as_str())
        });
        if prefix.is_empty() {
            Some(found.unwrap_or(""))
        } else {
            found
        }
    }

    fn finish_element(&mut self) -> Result<Option<OpenElement<'a>>> {
        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };
        self.scopes.push(pending.declarations.clone());

        let namespace = self
            .resolve(pending.prefix)
            .ok_or_else(|| Error::UnknownPrefix(pending.prefix.to_string()))?
            .to_string();
        let name_id = self
            .document
            .add_name(pending.prefix, pending.local, &namespace);

        let mut attributes = Attributes::new();
        for (prefix, local, value) in pending.attributes {
            let namespace = if prefix.is_empty() {
                ""
            } else {
                self.resolve(prefix)
                    .ok_or_else(|| Error::UnknownPrefix(prefix.to_string()))?
            }
            .to_string();
            attributes.push((self.document.add_name(prefix, local, &namespace), value));
        }

        let node = self.document.new_element(name_id);
        if let Some(element) = self.document.element_mut(node) {
            element.declarations = pending.declarations;
            element.attributes = attributes;
        }
        self.add(node)?;
        Ok(Some(OpenElement {
            node,
            prefix: pending.prefix,
            local: pending.local,
        }))
    }

    fn element_open(&mut self) -> Result<()> {
        if let Some(open) = self.finish_element()? {
            self.open.push(open);
        }
        Ok(())
    }

    fn element_empty(&mut self) -> Result<()> {
        if self.finish_element()?.is_some() {
            self.scopes.pop();
        }
        Ok(())
    }

    fn element_close(&mut self, prefix: &str, local: &str) -> Result<()> {
        let found = qualified(prefix, local);
        let open = self.open.pop().ok_or_else(|| Error::InvalidCloseTag {
            expected: String::new(),
            found: found.clone(),
        })?;
        if open.prefix != prefix || open.local != local {
            return Err(Error::InvalidCloseTag {
                expected: open.qualified(),
                found,
            });
        }
        self.scopes.pop();
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        if self.open.is_empty() {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(Error::TextOutsideDocumentElement);
        }
        let text = parse_predefined_entities(text)?;
        let node = self.document.new_text(&text);
        self.add(node)
    }

    fn cdata(&mut self, text: &str) -> Result<()> {
        let node = self.document.new_cdata(text);
        self.add(node)
    }

    fn doctype(&mut self, start: usize, end: usize) -> Result<()> {
        let node = self.document.new_doctype(&self.xml[start..end]);
        self.add(node)
    }

    fn build(self) -> Result<Document> {
        if let Some(open) = self.open.last() {
            return Err(Error::UnclosedTag(open.qualified()));
        }
        self.document.document_element()?;
        Ok(self.document)
    }
}

impl Document {
    /// Parse a string into a document.
    ///
    /// The document must be well-formed, and every prefix used in an
    /// element or attribute name must be declared in scope. Line endings
    /// are normalized to `\n` before anything else.
    pub fn parse(xml: &str) -> Result<Document> {
        let xml = normalize_line_endings(xml);
        let mut builder = DocumentBuilder::new(&xml);

        for token in Tokenizer::from(&*xml) {
            match token? {
                Token::Declaration {
                    version,
                    encoding,
                    standalone,
                    ..
                } => {
                    builder.declaration(
                        version.as_str(),
                        encoding.map(|e| e.as_str()),
                        standalone,
                    );
                }
                Token::ProcessingInstruction {
                    target, content, ..
                } => {
                    if builder.doctype_start.is_some() {
                        continue;
                    }
                    let node = builder
                        .document
                        .new_processing_instruction(target.as_str(), content.map(|c| c.as_str()));
                    builder.add(node)?;
                }
                Token::Comment { text, .. } => {
                    // comments inside the internal subset belong to the doctype
                    if builder.doctype_start.is_some() {
                        continue;
                    }
                    let node = builder.document.new_comment(text.as_str());
                    builder.add(node)?;
                }
                Token::DtdStart { span, .. } => {
                    builder.doctype_start = Some(span.start());
                }
                Token::EmptyDtd { span, .. } => {
                    builder.doctype(span.start(), span.end())?;
                }
                Token::EntityDeclaration { .. } => {}
                Token::DtdEnd { span } => {
                    if let Some(start) = builder.doctype_start.take() {
                        builder.doctype(start, span.end())?;
                    }
                }
                Token::ElementStart { prefix, local, .. } => {
                    builder.element_start(prefix.as_str(), local.as_str());
                }
                Token::Attribute {
                    prefix,
                    local,
                    value,
                    ..
                } => {
                    builder.attribute(prefix.as_str(), local.as_str(), value.as_str())?;
                }
                Token::ElementEnd { end, .. } => match end {
                    ElementEnd::Open => builder.element_open()?,
                    ElementEnd::Empty => builder.element_empty()?,
                    ElementEnd::Close(prefix, local) => {
                        builder.element_close(prefix.as_str(), local.as_str())?
                    }
                },
                Token::Text { text } => {
                    builder.text(text.as_str())?;
                }
                Token::Cdata { text, .. } => {
                    builder.cdata(text.as_str())?;
                }
            }
        }

        builder.build()
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Document::parse(s)
    }
}

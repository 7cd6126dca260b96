use crate::name::NameId;

/// The type of an XML value.
///
/// Use it if you are interested in the type of a value without needing to
/// match on it.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ValueType {
    /// Document root that holds everything.
    Root,
    Element,
    Text,
    Cdata,
    ProcessingInstruction,
    Comment,
    Doctype,
}

/// An XML value, stored in a node of a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Document root that holds everything. Note that this not the same as
    /// the document element.
    Root,
    /// Element; it has a name, namespace declarations and attributes.
    Element(Element),
    /// Decoded text.
    Text(Text),
    /// A CDATA section, kept as a section so it is written back verbatim.
    Cdata(Text),
    ProcessingInstruction(ProcessingInstruction),
    Comment(Comment),
    /// A document type declaration, kept as its source text.
    Doctype(String),
}

impl Value {
    /// Returns the type of the XML value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Root => ValueType::Root,
            Value::Element(_) => ValueType::Element,
            Value::Text(_) => ValueType::Text,
            Value::Cdata(_) => ValueType::Cdata,
            Value::ProcessingInstruction(_) => ValueType::ProcessingInstruction,
            Value::Comment(_) => ValueType::Comment,
            Value::Doctype(_) => ValueType::Doctype,
        }
    }
}

/// Namespace declarations of an element, in source order.
///
/// The empty prefix is the default namespace declaration.
pub type Declarations = Vec<(String, String)>;
/// Attributes of an element, in source order, with decoded values.
pub type Attributes = Vec<(NameId, String)>;

/// XML element value.
///
/// Example: `<foo/>` or `<foo xmlns:x="urn:x" x:bar="baz"/>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub(crate) name_id: NameId,
    pub(crate) declarations: Declarations,
    pub(crate) attributes: Attributes,
}

impl Element {
    pub(crate) fn new(name_id: NameId) -> Self {
        Element {
            name_id,
            declarations: Declarations::new(),
            attributes: Attributes::new(),
        }
    }

    /// The name of the element.
    pub fn name(&self) -> NameId {
        self.name_id
    }

    /// Namespace declarations made on this element.
    ///
    /// This does not include declarations made on ancestors.
    pub fn declarations(&self) -> &Declarations {
        &self.declarations
    }

    /// The attributes of the element.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Get an attribute value by name.
    pub fn get_attribute(&self, name_id: NameId) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(id, _)| *id == name_id)
            .map(|(_, value)| value.as_str())
    }

    /// Get the namespace declared for a prefix on this element.
    pub fn get_declaration(&self, prefix: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Remove every declaration of a prefix from this element.
    ///
    /// Returns `true` if anything was removed.
    pub(crate) fn remove_declaration(&mut self, prefix: &str) -> bool {
        let before = self.declarations.len();
        self.declarations.retain(|(p, _)| p != prefix);
        before != self.declarations.len()
    }
}

/// XML text value.
///
/// Example: `Bar` in `<foo>Bar</foo>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub(crate) text: String,
}

impl Text {
    pub(crate) fn new(text: String) -> Self {
        Text { text }
    }

    /// Get the text value.
    pub fn get(&self) -> &str {
        &self.text
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

/// XML comment.
///
/// Example: `<!-- foo -->`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub(crate) text: String,
}

impl Comment {
    pub(crate) fn new(text: String) -> Self {
        Comment { text }
    }

    /// Get the comment text.
    pub fn get(&self) -> &str {
        &self.text
    }
}

/// XML processing instruction value.
///
/// Example: `<?foo?>` or `<?foo bar?>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingInstruction {
    pub(crate) target: String,
    pub(crate) data: Option<String>,
}

impl ProcessingInstruction {
    pub(crate) fn new(target: String, data: Option<String>) -> Self {
        ProcessingInstruction { target, data }
    }

    /// Get processing instruction target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get processing instruction data.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

//! Xmlcleaner removes cruft from XML documents: comments, elements and
//! attributes in a given namespace, and namespace declarations nothing uses
//! any more. It can also tell you the default namespace, the document
//! element's name and the declared prefixes, and reformat a document with
//! indentation as a final step.
//!
//! Every cleaning operation exists as a plain function that takes a
//! document and returns the result:
//!
//! ```rust
//! let xml = r#"<a xmlns:x="urn:x"><x:b/><!--c--><d x:attr="1"/></a>"#;
//! let xml = xmlcleaner::remove_xml_comments(xml)?;
//! assert_eq!(xml, r#"<a xmlns:x="urn:x"><x:b/><d x:attr="1"/></a>"#);
//! let xml = xmlcleaner::remove_elements_by_prefix("x", &xml)?;
//! assert_eq!(xml, r#"<a xmlns:x="urn:x"><d x:attr="1"/></a>"#);
//! # Ok::<(), xmlcleaner::Error>(())
//! ```
//!
//! and as a method on [`XmlCleaner`], which stores a document so that
//! operations can be chained.
//!
//! Elements and attributes are matched by namespace: the prefix you pass
//! is looked up in the document's declarations and anything in that
//! namespace is removed, whatever prefix it is written with. The lookup is
//! document-wide; if a prefix is declared more than once, the last
//! declaration in document order is used.
#![forbid(unsafe_code)]

mod access;
pub mod cleaner;
mod creation;
mod document;
mod encoding;
mod entity;
mod error;
mod executor;
mod idmap;
mod manipulation;
mod name;
mod namespace;
mod parse;
mod prune;
mod serialize;
mod tidy;
mod transform;
mod xmlvalue;

pub use access::NodeEdge;
pub use cleaner::{
    default_namespace, remove_attributes_by_prefix, remove_elements_by_prefix,
    remove_unused_namespaces, remove_xml_comments, root_element_name, tidy_xml, xml_namespaces,
    XmlCleaner,
};
pub use document::{Declaration, Document, Node};
pub use encoding::{decode_xml, CharacterEncoding};
pub use error::{Error, ErrorKind, Result};
pub use executor::{apply, apply_document};
pub use name::{Name, NameId};
pub use namespace::{
    extract_default_namespace, extract_namespaces, NamespaceBinding, NamespaceIndex,
};
pub use prune::{prune_document, prune_unused};
pub use serialize::SerializeOptions;
pub use tidy::{Reformatter, Tidy, TidyConfig, TidyValue};
pub use transform::{MatchPredicate, Transform};
pub use xmlvalue::{
    Attributes, Comment, Declarations, Element, ProcessingInstruction, Text, Value, ValueType,
};

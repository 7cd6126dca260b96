//! Cleaning operations.
//!
//! Every operation comes in two forms: a function here that takes a
//! document and returns the result, and a method on [`XmlCleaner`] that
//! works on a stored document so operations can be chained.
use log::debug;

use crate::document::Document;
use crate::encoding::{decode_xml, CharacterEncoding};
use crate::error::{Error, Result};
use crate::executor::apply_document;
use crate::namespace::{self, NamespaceIndex};
use crate::prune::prune_document;
use crate::tidy::{Reformatter, Tidy, TidyConfig};
use crate::transform::{MatchPredicate, Transform};

/// Remove all comments.
pub fn remove_xml_comments(xml: &str) -> Result<String> {
    let document = Document::parse(xml)?;
    let index = NamespaceIndex::from_document(&document);
    let transform = Transform::build(&MatchPredicate::Comment, &index)?;
    Ok(apply_document(&transform, &document)?.to_xml_string())
}

/// Remove all elements, with their content, in the namespace bound to
/// `prefix`.
pub fn remove_elements_by_prefix(prefix: &str, xml: &str) -> Result<String> {
    remove_by_prefix(MatchPredicate::ElementByPrefix(prefix.to_string()), prefix, xml)
}

/// Remove all attributes in the namespace bound to `prefix`.
pub fn remove_attributes_by_prefix(prefix: &str, xml: &str) -> Result<String> {
    remove_by_prefix(MatchPredicate::AttributeByPrefix(prefix.to_string()), prefix, xml)
}

fn remove_by_prefix(predicate: MatchPredicate, prefix: &str, xml: &str) -> Result<String> {
    if prefix.is_empty() {
        return Err(Error::EmptyPrefix);
    }
    let document = Document::parse(xml)?;
    let index = NamespaceIndex::from_document(&document);
    // an undeclared prefix binds no namespace, so nothing can match and
    // writing the parsed document back equals an identity transform
    if !index.contains(prefix) {
        debug!("prefix {} not declared, skipping transform", prefix);
        return Ok(document.to_xml_string());
    }
    let transform = Transform::build(&predicate, &index)?;
    Ok(apply_document(&transform, &document)?.to_xml_string())
}

/// Remove the declarations of prefixes no element or attribute uses.
pub fn remove_unused_namespaces(xml: &str) -> Result<String> {
    let mut document = Document::parse(xml)?;
    prune_document(&mut document);
    Ok(document.to_xml_string())
}

/// The URI of the default namespace.
pub fn default_namespace(xml: &str) -> Result<String> {
    namespace::extract_default_namespace(xml)
}

/// The local name of the document element.
pub fn root_element_name(xml: &str) -> Result<String> {
    let document = Document::parse(xml)?;
    Ok(document.root_element_name()?.to_string())
}

/// The prefixed namespace declarations. The default namespace is not
/// included.
pub fn xml_namespaces(xml: &str) -> Result<NamespaceIndex> {
    namespace::extract_namespaces(xml)
}

/// Reformat with the built-in [`Reformatter`].
pub fn tidy_xml(xml: &str, config: &TidyConfig, encoding: CharacterEncoding) -> Result<String> {
    Reformatter.repair(xml, config, encoding)
}

/// Cleans a stored XML document, one chained operation at a time.
///
/// ```rust
/// use xmlcleaner::XmlCleaner;
///
/// let mut cleaner = XmlCleaner::new();
/// cleaner
///     .set_xml(r#"<a xmlns:x="urn:x"><x:b/><!--c--><d x:attr="1"/></a>"#)
///     .remove_xml_comments()?
///     .remove_elements_by_prefix("x")?
///     .remove_attributes_by_prefix("x")?
///     .remove_unused_namespaces()?;
/// assert_eq!(cleaner.xml()?, "<a><d/></a>");
/// # Ok::<(), xmlcleaner::Error>(())
/// ```
///
/// An operation that fails leaves the stored document as it was.
#[derive(Debug, Clone)]
pub struct XmlCleaner<T: Tidy = Reformatter> {
    xml: Option<String>,
    character_encoding: CharacterEncoding,
    tidy_config: TidyConfig,
    tidy: T,
}

impl XmlCleaner<Reformatter> {
    /// A cleaner without a document, using `utf8` and the default tidy
    /// configuration.
    pub fn new() -> Self {
        Self::with_tidy(Reformatter)
    }
}

impl Default for XmlCleaner<Reformatter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tidy> XmlCleaner<T> {
    /// A cleaner that uses `tidy` for [`XmlCleaner::tidy_xml`].
    pub fn with_tidy(tidy: T) -> Self {
        XmlCleaner {
            xml: None,
            character_encoding: CharacterEncoding::default(),
            tidy_config: TidyConfig::default(),
            tidy,
        }
    }

    /// Store the document further operations work on.
    pub fn set_xml(&mut self, xml: impl Into<String>) -> &mut Self {
        self.xml = Some(xml.into());
        self
    }

    /// Store a document given as bytes, detecting its encoding.
    pub fn set_xml_bytes(&mut self, data: &[u8]) -> Result<&mut Self> {
        let xml = decode_xml(data)?;
        Ok(self.set_xml(xml))
    }

    /// The stored document.
    pub fn xml(&self) -> Result<&str> {
        match self.xml.as_deref() {
            Some(xml) if !xml.is_empty() => Ok(xml),
            _ => Err(Error::NoXml),
        }
    }

    /// Set the output encoding by its short name, for instance `utf8`.
    pub fn set_character_encoding(&mut self, name: &str) -> Result<&mut Self> {
        self.character_encoding = name.parse()?;
        Ok(self)
    }

    pub fn character_encoding(&self) -> CharacterEncoding {
        self.character_encoding
    }

    pub fn set_tidy_config(&mut self, config: TidyConfig) -> &mut Self {
        self.tidy_config = config;
        self
    }

    pub fn tidy_config(&self) -> &TidyConfig {
        &self.tidy_config
    }

    fn update(&mut self, operation: impl FnOnce(&str) -> Result<String>) -> Result<&mut Self> {
        let result = operation(self.xml()?)?;
        self.xml = Some(result);
        Ok(self)
    }

    /// Remove all comments from the stored document.
    pub fn remove_xml_comments(&mut self) -> Result<&mut Self> {
        self.update(remove_xml_comments)
    }

    /// Remove elements in the namespace bound to `prefix` from the stored
    /// document.
    pub fn remove_elements_by_prefix(&mut self, prefix: &str) -> Result<&mut Self> {
        if prefix.is_empty() {
            return Err(Error::EmptyPrefix);
        }
        self.update(|xml| remove_elements_by_prefix(prefix, xml))
    }

    /// Remove attributes in the namespace bound to `prefix` from the stored
    /// document.
    pub fn remove_attributes_by_prefix(&mut self, prefix: &str) -> Result<&mut Self> {
        if prefix.is_empty() {
            return Err(Error::EmptyPrefix);
        }
        self.update(|xml| remove_attributes_by_prefix(prefix, xml))
    }

    /// Remove unused prefix declarations from the stored document.
    pub fn remove_unused_namespaces(&mut self) -> Result<&mut Self> {
        self.update(remove_unused_namespaces)
    }

    /// The default namespace URI of the stored document.
    pub fn default_namespace(&self) -> Result<String> {
        default_namespace(self.xml()?)
    }

    /// The local name of the stored document's document element.
    pub fn root_element_name(&self) -> Result<String> {
        root_element_name(self.xml()?)
    }

    /// The prefixed namespace declarations of the stored document.
    pub fn xml_namespaces(&self) -> Result<NamespaceIndex> {
        xml_namespaces(self.xml()?)
    }

    /// Run the tidy collaborator over the stored document. The result is
    /// returned, not stored.
    pub fn tidy_xml(&self) -> Result<String> {
        self.tidy
            .repair(self.xml()?, &self.tidy_config, self.character_encoding)
    }

    /// Run the tidy collaborator over a given document with this cleaner's
    /// configuration and encoding.
    pub fn tidy_xml_with(&self, xml: &str) -> Result<String> {
        self.tidy
            .repair(xml, &self.tidy_config, self.character_encoding)
    }
}

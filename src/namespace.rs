use ahash::{HashMap, HashMapExt};

use crate::document::Document;
use crate::error::{Error, Result};

/// A prefixed namespace declaration, `xmlns:prefix="uri"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceBinding {
    pub prefix: String,
    pub uri: String,
}

/// The namespace declarations of a document, indexed by prefix.
///
/// The index is flat and document-wide: it does not track which element a
/// declaration is made on. If a prefix is declared more than once, the
/// declaration that comes last in document order wins. The default
/// namespace is not part of the index; see [`extract_default_namespace`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceIndex {
    by_prefix: HashMap<String, String>,
    scanned: Vec<NamespaceBinding>,
}

impl NamespaceIndex {
    pub fn new() -> Self {
        NamespaceIndex {
            by_prefix: HashMap::new(),
            scanned: Vec::new(),
        }
    }

    /// Scan every element of a parsed document for prefixed declarations.
    pub fn from_document(document: &Document) -> Self {
        let mut index = NamespaceIndex::new();
        for (_, element) in document.elements(document.root()) {
            for (prefix, uri) in element.declarations() {
                if !prefix.is_empty() {
                    index.insert(prefix, uri);
                }
            }
        }
        index
    }

    /// Record a binding; a later binding for the same prefix overwrites an
    /// earlier one.
    pub fn insert(&mut self, prefix: &str, uri: &str) {
        self.by_prefix.insert(prefix.to_string(), uri.to_string());
        self.scanned.push(NamespaceBinding {
            prefix: prefix.to_string(),
            uri: uri.to_string(),
        });
    }

    /// The URI bound to a prefix.
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.by_prefix.get(prefix).map(|uri| uri.as_str())
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.by_prefix.contains_key(prefix)
    }

    pub fn len(&self) -> usize {
        self.by_prefix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_prefix.is_empty()
    }

    /// Iterate over prefix, URI pairs. The order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.by_prefix
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    /// Iterate over the prefixes. The order is unspecified.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_prefix.keys().map(|prefix| prefix.as_str())
    }

    /// Prefix, URI pairs sorted by prefix.
    pub fn sorted(&self) -> Vec<(String, String)> {
        let mut bindings = self
            .by_prefix
            .iter()
            .map(|(prefix, uri)| (prefix.clone(), uri.clone()))
            .collect::<Vec<_>>();
        bindings.sort();
        bindings
    }

    /// The URI of every declaration in the order it was scanned, including
    /// declarations that were later overwritten.
    pub fn uris(&self) -> Vec<&str> {
        self.scanned.iter().map(|binding| binding.uri.as_str()).collect()
    }
}

/// Extract the prefixed namespace declarations of a document.
pub fn extract_namespaces(xml: &str) -> Result<NamespaceIndex> {
    let document = Document::parse(xml)?;
    Ok(NamespaceIndex::from_document(&document))
}

/// Extract the URI of the first default namespace declaration of a
/// document, in document order.
///
/// An undeclaration (`xmlns=""`) does not count. Fails with
/// [`Error::NoDefaultNamespace`] when there is none.
pub fn extract_default_namespace(xml: &str) -> Result<String> {
    let document = Document::parse(xml)?;
    default_namespace(&document)
}

pub(crate) fn default_namespace(document: &Document) -> Result<String> {
    document
        .elements(document.root())
        .find_map(|(_, element)| element.get_declaration("").filter(|uri| !uri.is_empty()))
        .map(|uri| uri.to_string())
        .ok_or(Error::NoDefaultNamespace)
}

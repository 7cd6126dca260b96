use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use crate::idmap::{IdIndex, IdMap};

/// The namespace URI the `xml` prefix is always bound to.
pub(crate) const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Id uniquely identifying a name within a [`Document`](crate::Document).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct NameId(u32);

impl IdIndex<NameId> for NameId {
    fn to_id(index: usize) -> NameId {
        NameId(index as u32)
    }

    fn from_id(id: NameId) -> usize {
        id.0 as usize
    }
}

/// An element or attribute name as written in the document, together with
/// the namespace URI its prefix resolved to.
///
/// The namespace is empty when the name is in no namespace.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Name {
    prefix: String,
    local: String,
    namespace: String,
}

impl Name {
    pub(crate) fn new(prefix: &str, local: &str, namespace: &str) -> Self {
        Name {
            prefix: prefix.to_string(),
            local: local.to_string(),
            namespace: namespace.to_string(),
        }
    }

    /// The prefix, or the empty string for an unprefixed name.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The local name.
    pub fn local(&self) -> &str {
        &self.local
    }

    /// The namespace URI, or the empty string if not in a namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The qualified name, `prefix:local` or just `local`.
    pub fn qualified(&self) -> Cow<'_, str> {
        if self.prefix.is_empty() {
            Cow::Borrowed(&self.local)
        } else {
            Cow::Owned(format!("{}:{}", self.prefix, self.local))
        }
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.qualified())
    }
}

pub(crate) type NameLookup = IdMap<NameId, Name>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified() {
        assert_eq!(Name::new("x", "b", "urn:x").qualified(), "x:b");
        assert_eq!(Name::new("", "b", "").qualified(), "b");
    }

    #[test]
    fn test_same_local_different_namespace() {
        let mut lookup = NameLookup::new();
        let a = lookup.get_id_mut(Name::new("x", "b", "urn:x"));
        let b = lookup.get_id_mut(Name::new("x", "b", "urn:y"));
        assert_ne!(a, b);
    }
}

use log::debug;

use crate::document::{Document, Node};
use crate::error::{Error, Result};
use crate::name::NameId;
use crate::namespace::NamespaceIndex;
use crate::xmlvalue::Value;

/// Which structural matches a transform removes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MatchPredicate {
    /// Every comment, at any depth.
    Comment,
    /// Every element in the namespace bound to the prefix, with its
    /// descendants.
    ElementByPrefix(String),
    /// Every attribute in the namespace bound to the prefix.
    AttributeByPrefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Pattern {
    AnyNode,
    AnyAttribute,
    Comment,
    ElementInNamespace(String),
    AttributeInNamespace(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Copy,
    Elide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rule {
    pattern: Pattern,
    action: Action,
}

impl Rule {
    fn matches_node(&self, document: &Document, node: Node) -> bool {
        match (&self.pattern, document.value(node)) {
            (Pattern::AnyNode, _) => true,
            (Pattern::Comment, Value::Comment(_)) => true,
            (Pattern::ElementInNamespace(uri), Value::Element(element)) => {
                document.name(element.name()).namespace() == uri
            }
            _ => false,
        }
    }

    fn matches_attribute(&self, document: &Document, name_id: NameId) -> bool {
        match &self.pattern {
            Pattern::AnyAttribute => true,
            Pattern::AttributeInNamespace(uri) => document.name(name_id).namespace() == uri,
            _ => false,
        }
    }
}

/// A copy-transform: copies a document unchanged, except for what its
/// elision rule matches.
///
/// Rules are tried in order and the first matching rule decides; the
/// elision rule comes before the copy rules so it wins wherever both match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transform {
    rules: Vec<Rule>,
    bindings: NamespaceIndex,
}

impl Transform {
    /// A transform that copies everything.
    pub fn identity(bindings: &NamespaceIndex) -> Self {
        Transform {
            rules: Self::copy_rules(),
            bindings: bindings.clone(),
        }
    }

    /// Build a transform that elides whatever `predicate` matches.
    ///
    /// Prefixes are resolved to namespace URIs through `bindings`, so
    /// matching is by namespace, not by how a name happens to be written.
    pub fn build(predicate: &MatchPredicate, bindings: &NamespaceIndex) -> Result<Self> {
        let pattern = match predicate {
            MatchPredicate::Comment => Pattern::Comment,
            MatchPredicate::ElementByPrefix(prefix) => {
                Pattern::ElementInNamespace(Self::resolve(prefix, bindings)?)
            }
            MatchPredicate::AttributeByPrefix(prefix) => {
                Pattern::AttributeInNamespace(Self::resolve(prefix, bindings)?)
            }
        };
        debug!("built transform eliding {:?}", pattern);
        let mut rules = vec![Rule {
            pattern,
            action: Action::Elide,
        }];
        rules.extend(Self::copy_rules());
        Ok(Transform {
            rules,
            bindings: bindings.clone(),
        })
    }

    fn resolve(prefix: &str, bindings: &NamespaceIndex) -> Result<String> {
        if prefix.is_empty() {
            return Err(Error::InvalidPredicate(
                "a prefix predicate needs a non-empty prefix".to_string(),
            ));
        }
        bindings
            .get(prefix)
            .map(|uri| uri.to_string())
            .ok_or_else(|| Error::UndeclaredPrefix(prefix.to_string()))
    }

    fn copy_rules() -> Vec<Rule> {
        vec![
            Rule {
                pattern: Pattern::AnyNode,
                action: Action::Copy,
            },
            Rule {
                pattern: Pattern::AnyAttribute,
                action: Action::Copy,
            },
        ]
    }

    /// The namespace bindings this transform was built against.
    pub fn bindings(&self) -> &NamespaceIndex {
        &self.bindings
    }

    pub(crate) fn node_action(&self, document: &Document, node: Node) -> Action {
        self.rules
            .iter()
            .find(|rule| rule.matches_node(document, node))
            .map(|rule| rule.action)
            .unwrap_or(Action::Copy)
    }

    pub(crate) fn attribute_action(&self, document: &Document, name_id: NameId) -> Action {
        self.rules
            .iter()
            .find(|rule| rule.matches_attribute(document, name_id))
            .map(|rule| rule.action)
            .unwrap_or(Action::Copy)
    }
}

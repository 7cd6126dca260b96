use log::{debug, trace};

use crate::access::NodeEdge;
use crate::document::{Document, Node};
use crate::error::{Error, Result};
use crate::transform::{Action, Transform};
use crate::xmlvalue::{Element, Value};

/// Apply a transform to an XML string and serialize the result.
///
/// The output is not indented; the XML declaration, if any, is kept.
pub fn apply(transform: &Transform, xml: &str) -> Result<String> {
    let document = Document::parse(xml)?;
    Ok(apply_document(transform, &document)?.to_xml_string())
}

/// Apply a transform to a parsed document, producing a new document.
///
/// This is a single top-down pass: every node is either copied or, when
/// the transform elides it, skipped together with its descendants.
pub fn apply_document(transform: &Transform, source: &Document) -> Result<Document> {
    let mut target = source.empty_like();
    let mut parents = vec![target.root()];
    let mut elided: Option<Node> = None;
    let mut elided_count = 0usize;

    for edge in source.traverse(source.root()) {
        match edge {
            NodeEdge::Start(node) => {
                if elided.is_some() || node == source.root() {
                    continue;
                }
                if transform.node_action(source, node) == Action::Elide {
                    trace!("eliding {:?}", source.value_type(node));
                    if source.element(node).is_some() && source.is_top_level(node) {
                        return Err(Error::DocumentElementRemoved);
                    }
                    elided = Some(node);
                    elided_count += 1;
                    continue;
                }
                let copy = shallow_copy(transform, source, node, &mut target);
                let parent = parents.last().copied().unwrap_or(target.root());
                target.append(parent, copy)?;
                if source.element(node).is_some() {
                    parents.push(copy);
                }
            }
            NodeEdge::End(node) => {
                if let Some(elided_node) = elided {
                    if elided_node == node {
                        elided = None;
                    }
                    continue;
                }
                if node != source.root() && source.element(node).is_some() {
                    parents.pop();
                }
            }
        }
    }
    debug!("transform applied, {} nodes elided", elided_count);
    Ok(target)
}

fn shallow_copy(transform: &Transform, source: &Document, node: Node, target: &mut Document) -> Node {
    let value = match source.value(node) {
        Value::Element(element) => {
            let mut copy = Element::new(element.name());
            copy.declarations = element.declarations().clone();
            copy.attributes = element
                .attributes()
                .iter()
                .filter(|(name_id, _)| {
                    transform.attribute_action(source, *name_id) == Action::Copy
                })
                .cloned()
                .collect();
            Value::Element(copy)
        }
        value => value.clone(),
    };
    target.new_node(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::NamespaceIndex;
    use crate::transform::MatchPredicate;

    fn run(predicate: MatchPredicate, xml: &str) -> Result<String> {
        let document = Document::parse(xml)?;
        let index = NamespaceIndex::from_document(&document);
        let transform = Transform::build(&predicate, &index)?;
        Ok(apply_document(&transform, &document)?.to_xml_string())
    }

    #[test]
    fn test_identity() {
        let xml = r#"<a xmlns:x="urn:x"><x:b>text</x:b><!--c--><d x:attr="1"/></a>"#;
        let transform = Transform::identity(&NamespaceIndex::new());
        assert_eq!(apply(&transform, xml).unwrap(), xml);
    }

    #[test]
    fn test_elide_nested_elements() {
        let xml = r#"<a xmlns:x="urn:x"><b><x:c><x:d/><e/></x:c>tail</b></a>"#;
        assert_eq!(
            run(MatchPredicate::ElementByPrefix("x".into()), xml).unwrap(),
            r#"<a xmlns:x="urn:x"><b>tail</b></a>"#
        );
    }

    #[test]
    fn test_elide_merges_text() {
        let xml = "<a>one<!--c-->two</a>";
        let document = Document::parse(xml).unwrap();
        let transform = Transform::build(&MatchPredicate::Comment, &NamespaceIndex::new()).unwrap();
        let result = apply_document(&transform, &document).unwrap();
        let a = result.document_element().unwrap();
        assert_eq!(result.children(a).count(), 1);
        assert_eq!(result.to_xml_string(), "<a>onetwo</a>");
    }

    #[test]
    fn test_elide_by_namespace_not_by_written_prefix() {
        let xml = r#"<a xmlns:x="urn:x" xmlns:y="urn:x"><y:b/><c/></a>"#;
        assert_eq!(
            run(MatchPredicate::ElementByPrefix("x".into()), xml).unwrap(),
            r#"<a xmlns:x="urn:x" xmlns:y="urn:x"><c/></a>"#
        );
    }

    #[test]
    fn test_elide_document_element() {
        let xml = r#"<x:a xmlns:x="urn:x"/>"#;
        assert!(matches!(
            run(MatchPredicate::ElementByPrefix("x".into()), xml),
            Err(Error::DocumentElementRemoved)
        ));
    }

    #[test]
    fn test_top_level_comments_elided() {
        let xml = "<?xml version=\"1.0\"?>\n<!--before-->\n<a/>\n<!--after-->";
        assert_eq!(
            run(MatchPredicate::Comment, xml).unwrap(),
            "<?xml version=\"1.0\"?>\n<a/>"
        );
    }
}

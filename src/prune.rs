use ahash::{HashSet, HashSetExt};
use log::debug;

use crate::document::Document;
use crate::error::Result;
use crate::namespace::NamespaceIndex;

/// Remove the declarations of prefixes that no element or attribute name
/// uses any more.
pub fn prune_unused(xml: &str) -> Result<String> {
    let mut document = Document::parse(xml)?;
    prune_document(&mut document);
    Ok(document.to_xml_string())
}

/// Remove unused prefix declarations from a parsed document, in place.
///
/// Usage is judged against element and attribute names only, never against
/// other declarations, so the order in which prefixes are pruned does not
/// matter. Default namespace declarations are left alone. Returns the
/// prefixes that were pruned, sorted.
pub fn prune_document(document: &mut Document) -> Vec<String> {
    let index = NamespaceIndex::from_document(document);
    let used = used_prefixes(document);
    let mut unused = index
        .prefixes()
        .filter(|prefix| !used.contains(*prefix))
        .map(|prefix| prefix.to_string())
        .collect::<Vec<_>>();
    unused.sort();
    if unused.is_empty() {
        return unused;
    }

    let elements = document
        .elements(document.root())
        .map(|(node, _)| node)
        .collect::<Vec<_>>();
    for node in elements {
        let Some(element) = document.element_mut(node) else {
            continue;
        };
        for prefix in &unused {
            if element.remove_declaration(prefix) {
                debug!("removed unused declaration of prefix {}", prefix);
            }
        }
    }
    unused
}

fn used_prefixes(document: &Document) -> HashSet<String> {
    let mut used = HashSet::new();
    for (_, element) in document.elements(document.root()) {
        let name = document.name(element.name());
        used.insert(name.prefix().to_string());
        for (name_id, _) in element.attributes() {
            used.insert(document.name(*name_id).prefix().to_string());
        }
    }
    used
}

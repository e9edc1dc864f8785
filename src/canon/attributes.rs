//! Attribute collection: the attributes written on a start tag, including
//! `xml:*` attributes inherited from ancestors that are themselves excluded
//! from the output subset. Gathers an element's own attributes as a flat
//! ordered list, then walks ancestors nearest-first via `tree.rs`'s
//! `ancestors()` to fill in any inherited `xml:*` bindings not already
//! present.

use ahash::AHashSet;

use crate::algorithm::Algorithm;
use crate::error::Error;
use crate::namespace_scope::XML_NAMESPACE_URI;
use crate::nodeset::NodeSet;
use crate::tree::{Document, Node};
use crate::value::Attribute;

/// The attributes to write on `element`'s start tag, unsorted (sorting is
/// `ordering::sort_attributes`'s job, applied after this collection so
/// inherited attributes participate in the same ordering).
pub fn collect(
    doc: &Document,
    element: Node,
    node_set: Option<&NodeSet>,
    algorithm: Algorithm,
) -> Result<Vec<Attribute>, Error> {
    let value = doc.element(element).ok_or(Error::NotAnElement)?;

    let mut attributes: Vec<Attribute> = match node_set {
        None => value.attributes.clone(),
        Some(node_set) => value
            .attributes
            .iter()
            .filter(|attr| {
                node_set.contains_attribute(element, &attr.name.local_name, &attr.name.namespace_uri)
            })
            .cloned()
            .collect(),
    };

    if !algorithm.exclusive() {
        if let Some(node_set) = node_set {
            if node_set.contains_node(element) {
                inherit_xml_attributes(doc, element, node_set, &mut attributes);
            }
        }
    }

    Ok(attributes)
}

/// Walk ancestors nearest-first, recording the first `xml:*` attribute seen
/// for each local name that `element` doesn't already declare itself —
/// but only from ancestors that are *not* themselves in the subset (an
/// in-subset ancestor already emits the attribute on its own start tag).
fn inherit_xml_attributes(
    doc: &Document,
    element: Node,
    node_set: &NodeSet,
    attributes: &mut Vec<Attribute>,
) {
    let mut seen: AHashSet<String> = attributes
        .iter()
        .filter(|a| a.name.namespace_uri == XML_NAMESPACE_URI)
        .map(|a| a.name.local_name.clone())
        .collect();

    for ancestor in doc.ancestors(element) {
        let Some(ancestor_element) = doc.element(ancestor) else {
            continue;
        };
        if node_set.contains_node(ancestor) {
            continue;
        }
        for attr in &ancestor_element.attributes {
            if attr.name.namespace_uri != XML_NAMESPACE_URI {
                continue;
            }
            if !seen.insert(attr.name.local_name.clone()) {
                continue;
            }
            attributes.push(attr.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;
    use crate::creation::DocumentBuilder;
    use crate::value::QName;

    #[test]
    fn whole_document_collects_declared_attributes_unfiltered() {
        let mut builder = DocumentBuilder::new();
        builder.element_local("a").attribute_local("x", "1").end();
        let doc = builder.finish().unwrap();
        let root = doc.document_element().unwrap();
        let attrs = collect(&doc, root, None, Algorithm::Inclusive).unwrap();
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn inherits_xml_attribute_from_excluded_ancestor() {
        let mut builder = DocumentBuilder::new();
        builder
            .element_local("a")
            .attribute(Attribute::new(
                QName::new(Some("xml".to_string()), "lang".to_string(), XML_NAMESPACE_URI.to_string()),
                "en",
            ))
            .element_local("b")
            .end()
            .end();
        let doc = builder.finish().unwrap();
        let root = doc.document_element().unwrap();
        let b = doc.children(root).next().unwrap();

        let mut node_set = NodeSet::new();
        node_set.push_node(b); // `a` excluded, `b` included

        let attrs = collect(&doc, b, Some(&node_set), Algorithm::Inclusive).unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].name.local_name, "lang");
    }

    #[test]
    fn exclusive_mode_never_inherits_xml_attributes() {
        let mut builder = DocumentBuilder::new();
        builder
            .element_local("a")
            .attribute(Attribute::new(
                QName::new(Some("xml".to_string()), "lang".to_string(), XML_NAMESPACE_URI.to_string()),
                "en",
            ))
            .element_local("b")
            .end()
            .end();
        let doc = builder.finish().unwrap();
        let root = doc.document_element().unwrap();
        let b = doc.children(root).next().unwrap();

        let mut node_set = NodeSet::new();
        node_set.push_node(b);

        let attrs = collect(&doc, b, Some(&node_set), Algorithm::Exclusive).unwrap();
        assert!(attrs.is_empty());
    }
}

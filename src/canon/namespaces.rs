//! Namespace declaration selection for a start tag: which
//! `xmlns[:prefix]="uri"` declarations to emit on a given element, for
//! either the whole-document or subset case. Walks the in-scope namespace
//! bindings per element and renders each as a `xmlns[:prefix]="uri"` token,
//! filtered by a redundancy check against the running [`NamespaceScope`]
//! and, in exclusive mode, by the visibly-utilized prefix set.

use crate::algorithm::Algorithm;
use crate::canon::walker::in_subset;
use crate::namespace_scope::NamespaceScope;
use crate::nodeset::NodeSet;
use crate::tree::{Document, Node};
use crate::value::{Element, ValueType};

/// The namespace declarations to emit on `element`'s start tag, sorted
/// with the empty (default-namespace) prefix first, then lexicographically.
pub fn declarations_to_emit(
    doc: &Document,
    element: Node,
    value: &Element,
    scope: &NamespaceScope,
    node_set: Option<&NodeSet>,
    algorithm: Algorithm,
) -> Vec<(String, String)> {
    let mut decls = match node_set {
        None => whole_document_decls(doc, element, value, scope, algorithm),
        Some(node_set) => subset_decls(doc, element, value, scope, node_set, algorithm),
    };
    decls.sort_by(|a, b| a.0.cmp(&b.0));
    decls
}

/// A prefix `p` declared (with URI `u`) on `declaring` is visibly utilized
/// there iff `declaring` itself, or some descendant reachable without
/// crossing a redeclaration of `p` to a *different* URI, uses `p` in its own
/// qualified name or in one of its (emitted) attributes' names. Descendants
/// past a redeclaration to the same URI are still governed by `declaring`'s
/// binding (the redeclaration would itself be dropped as redundant), so the
/// walk continues through them. In subset mode, a redeclaration that is
/// itself excluded from the node-set never takes effect in the output, so it
/// does not stop the walk either — see [`redeclares_to_different_uri`].
///
/// Walked with an explicit stack, matching the element walker's own
/// depth-first-without-recursion discipline (§9).
fn visibly_utilized(
    doc: &Document,
    declaring: Node,
    node_set: Option<&NodeSet>,
    prefix: &str,
    uri: &str,
) -> bool {
    let mut stack = vec![declaring];
    while let Some(node) = stack.pop() {
        if node_uses_prefix(doc, node, node_set, prefix) {
            return true;
        }
        for child in doc.children(node) {
            if redeclares_to_different_uri(doc, child, node_set, prefix, uri) {
                continue;
            }
            stack.push(child);
        }
    }
    false
}

/// Whether `child` redeclares `prefix` to a URI other than `uri` *in the
/// output*. In whole-document mode the tree shape is the output, so any
/// redeclaration in the tree counts. In subset mode a redeclaration only
/// takes effect on the canonicalized form if the namespace axis node for
/// `prefix` on `child` is itself selected — an excluded redeclaration
/// leaves `declaring`'s binding governing `child`'s subtree in the output,
/// so the walk must not stop there.
fn redeclares_to_different_uri(
    doc: &Document,
    child: Node,
    node_set: Option<&NodeSet>,
    prefix: &str,
    uri: &str,
) -> bool {
    let Some(child_element) = doc.element(child) else {
        return false;
    };
    let Some(redecl) = child_element.namespaces.iter().find(|d| d.prefix == prefix) else {
        return false;
    };
    if redecl.uri == uri {
        return false;
    }
    match node_set {
        None => true,
        Some(ns) => in_subset(Some(ns), child) && ns.contains_namespace(child, prefix),
    }
}

fn node_uses_prefix(doc: &Document, node: Node, node_set: Option<&NodeSet>, prefix: &str) -> bool {
    let Some(element) = doc.element(node) else {
        return false;
    };
    if !in_subset(node_set, node) {
        return false;
    }
    if element.name.prefix.as_deref() == Some(prefix) {
        return true;
    }
    element.attributes.iter().any(|attr| {
        attr.name.prefix.as_deref() == Some(prefix)
            && node_set.map_or(true, |ns| {
                ns.contains_attribute(node, &attr.name.local_name, &attr.name.namespace_uri)
            })
    })
}

fn default_in_scope_is_empty(scope: &NamespaceScope) -> bool {
    scope.uri("").map_or(true, str::is_empty)
}

fn whole_document_decls(
    doc: &Document,
    element: Node,
    value: &Element,
    scope: &NamespaceScope,
    algorithm: Algorithm,
) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for decl in &value.namespaces {
        let prefix = decl.prefix.as_str();
        let uri = decl.uri.as_str();

        if scope.uri(prefix) == Some(uri) {
            continue;
        }

        if algorithm.exclusive() {
            if visibly_utilized(doc, element, None, prefix, uri) {
                out.push((decl.prefix.clone(), decl.uri.clone()));
            }
            continue;
        }

        if uri.is_empty() {
            let has_element_parent = doc
                .parent(element)
                .is_some_and(|p| doc.value_type(p) == ValueType::Element);
            if !has_element_parent || default_in_scope_is_empty(scope) {
                continue;
            }
        }

        out.push((decl.prefix.clone(), decl.uri.clone()));
    }
    out
}

fn subset_decls(
    doc: &Document,
    element: Node,
    value: &Element,
    scope: &NamespaceScope,
    node_set: &NodeSet,
    algorithm: Algorithm,
) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut declared_prefixes: ahash::AHashSet<String> = ahash::AHashSet::new();

    for prefix in node_set.namespaces_following(element) {
        let uri = doc.namespace_uri_in_scope(element, prefix).unwrap_or("");

        if scope.uri(prefix) == Some(uri) {
            continue;
        }

        if algorithm.exclusive() {
            if visibly_utilized(doc, element, Some(node_set), prefix, uri) {
                out.push((prefix.to_string(), uri.to_string()));
                declared_prefixes.insert(prefix.to_string());
            }
            continue;
        }

        out.push((prefix.to_string(), uri.to_string()));
        declared_prefixes.insert(prefix.to_string());
    }

    // Subset case: an included element whose own resolved namespace is
    // empty may need an explicit `xmlns=""`
    // undeclaration even though no Namespace node supplied one, if an
    // excluded ancestor is the one that actually undeclared the default.
    if node_set.contains_node(element)
        && value.name.namespace_uri.is_empty()
        && !declared_prefixes.contains("")
    {
        if let Some(ancestor) = doc.ancestors(element).find(|a| node_set.contains_node(*a)) {
            let ancestor_default = doc.namespace_uri_in_scope(ancestor, "").unwrap_or("");
            if !ancestor_default.is_empty() {
                out.push((String::new(), String::new()));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creation::DocumentBuilder;
    use crate::value::{Attribute, QName};

    #[test]
    fn redundant_declaration_is_skipped() {
        let mut builder = DocumentBuilder::new();
        builder
            .element_local("a")
            .namespace("x", "urn:x")
            .element_local("b")
            .namespace("x", "urn:x")
            .end()
            .end();
        let doc = builder.finish().unwrap();
        let root = doc.document_element().unwrap();
        let b = doc.children(root).next().unwrap();

        let mut scope = NamespaceScope::new();
        scope.push_context();
        scope.declare_prefix("x", "urn:x");
        scope.push_context();

        let value = doc.element(b).unwrap();
        let decls = declarations_to_emit(&doc, b, value, &scope, None, Algorithm::Inclusive);
        assert!(decls.is_empty());
    }

    #[test]
    fn default_namespace_undeclaration_is_kept_when_parent_has_default() {
        let mut builder = DocumentBuilder::new();
        builder
            .element_local("p")
            .namespace("", "http://p/")
            .element_local("c")
            .namespace("", "")
            .end()
            .end();
        let doc = builder.finish().unwrap();
        let root = doc.document_element().unwrap();
        let c = doc.children(root).next().unwrap();

        let mut scope = NamespaceScope::new();
        scope.push_context();
        scope.declare_prefix("", "http://p/");
        scope.push_context();

        let value = doc.element(c).unwrap();
        let decls = declarations_to_emit(&doc, c, value, &scope, None, Algorithm::Inclusive);
        assert_eq!(decls, vec![(String::new(), String::new())]);
    }

    /// Scenario 6: `u` is declared on `a` but only referenced by a
    /// descendant's attribute; `v` is declared on `a` and never referenced
    /// anywhere. Exclusive mode must keep `u` on `a` (visibly utilized
    /// transitively through `b`, which does not itself redeclare it) and
    /// drop `v`.
    #[test]
    fn exclusive_mode_drops_namespace_not_visibly_utilized() {
        let mut builder = DocumentBuilder::new();
        builder
            .element_local("a")
            .namespace("u", "http://u/")
            .namespace("v", "http://v/")
            .element_local("b")
            .attribute(Attribute::new(
                QName::new(Some("u".to_string()), "x".to_string(), "http://u/".to_string()),
                "1",
            ))
            .end()
            .end();
        let doc = builder.finish().unwrap();
        let root = doc.document_element().unwrap();

        let mut scope = NamespaceScope::new();
        scope.push_context();

        let value = doc.element(root).unwrap();
        let decls = declarations_to_emit(&doc, root, value, &scope, None, Algorithm::Exclusive);
        assert_eq!(decls, vec![("u".to_string(), "http://u/".to_string())]);
    }

    /// `b` (excluded from the node-set) redeclares `u` to a different URI
    /// than `a`'s declaration, but that redeclaration is itself not
    /// selected. Since it will never reach the output, `a`'s binding must
    /// still be treated as governing `c`, which is selected and uses `u`.
    #[test]
    fn subset_mode_sees_through_an_unselected_redeclaration() {
        let mut builder = DocumentBuilder::new();
        builder
            .element_local("a")
            .namespace("u", "http://u/")
            .element_local("b")
            .namespace("u", "http://other/")
            .element_local("c")
            .attribute(Attribute::new(
                QName::new(Some("u".to_string()), "y".to_string(), "http://u/".to_string()),
                "1",
            ))
            .end()
            .end()
            .end();
        let doc = builder.finish().unwrap();
        let a = doc.document_element().unwrap();
        let b = doc.children(a).next().unwrap();
        let c = doc.children(b).next().unwrap();

        let mut node_set = NodeSet::new();
        node_set.push_node(a);
        node_set.push_node(c);
        node_set.push_attribute(c, "y", "http://u/");

        assert!(visibly_utilized(&doc, a, Some(&node_set), "u", "http://u/"));
    }

    /// Same tree, but `b`'s redeclaration of `u` is itself selected this
    /// time — it does take effect in the output, so it cuts off `a`'s
    /// binding and `c`'s usage underneath no longer counts.
    #[test]
    fn subset_mode_stops_at_a_selected_redeclaration() {
        let mut builder = DocumentBuilder::new();
        builder
            .element_local("a")
            .namespace("u", "http://u/")
            .element_local("b")
            .namespace("u", "http://other/")
            .element_local("c")
            .attribute(Attribute::new(
                QName::new(Some("u".to_string()), "y".to_string(), "http://u/".to_string()),
                "1",
            ))
            .end()
            .end()
            .end();
        let doc = builder.finish().unwrap();
        let a = doc.document_element().unwrap();
        let b = doc.children(a).next().unwrap();
        let c = doc.children(b).next().unwrap();

        let mut node_set = NodeSet::new();
        node_set.push_node(a);
        node_set.push_node(b);
        node_set.push_namespace(b, "u");
        node_set.push_node(c);
        node_set.push_attribute(c, "y", "http://u/");

        assert!(!visibly_utilized(&doc, a, Some(&node_set), "u", "http://u/"));
    }
}

//! A deliberately small stand-in for a full XPath query engine, backing the
//! `write(document, xpath_expression, xpath_context)` subset entry point.
//!
//! It covers exactly the expression shapes the XML-C14N and XMLDSig
//! standards use in their own worked examples: a union of simple steps,
//! optionally with a parenthesized subtraction —
//! `(//. | //@* | //namespace::*) - (//*[local-name()='x'])` being the
//! canonical shape for "the whole document minus one subtree". This is not
//! a general XPath 1.0 evaluator; unsupported syntax is a [`Error::QueryError`],
//! not a panic.

use crate::error::Error;
use crate::nodeset::NodeSet;
use crate::tree::{Document, Node};
use crate::value::ValueType;

/// Context for evaluating an expression. Currently only carries the node
/// the expression is evaluated relative to; real XPath contexts also carry
/// variable and function bindings, which this evaluator does not support.
#[derive(Debug, Clone, Copy)]
pub struct XPathContext {
    pub context_node: Option<Node>,
}

impl XPathContext {
    pub fn document() -> Self {
        XPathContext { context_node: None }
    }
}

impl Default for XPathContext {
    fn default() -> Self {
        Self::document()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    AllNodes,
    AllAttributes,
    AllNamespaces,
    ElementsNamed,
}

struct Term {
    step: Step,
    name: Option<String>,
}

/// Evaluate `expr` against `doc` and return the selected node-set in
/// document order.
pub fn evaluate(doc: &Document, expr: &str, _ctx: &XPathContext) -> Result<NodeSet, Error> {
    let expr = expr.trim();
    let (positive, negative) = split_subtraction(expr)?;

    let mut set = NodeSet::new();
    apply_terms(doc, &parse_union(positive)?, &mut set);

    if let Some(negative) = negative {
        let mut excluded = NodeSet::new();
        apply_terms(doc, &parse_union(negative)?, &mut excluded);
        return Ok(subtract(&set, &excluded));
    }

    Ok(set)
}

fn split_subtraction(expr: &str) -> Result<(&str, Option<&str>), Error> {
    // Only a top-level ` - ` outside any parentheses separates the
    // subtrahend, matching the XMLDSig idiom `(A) - (B)`.
    let mut depth = 0i32;
    let bytes = expr.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b'-' if depth == 0 && i > 0 && bytes[i - 1] == b' ' => {
                let left = expr[..i].trim();
                let right = expr[i + 1..].trim();
                return Ok((left, Some(strip_parens(right))));
            }
            _ => {}
        }
        i += 1;
    }
    Ok((expr, None))
}

fn strip_parens(s: &str) -> &str {
    let s = s.trim();
    if s.starts_with('(') && s.ends_with(')') {
        s[1..s.len() - 1].trim()
    } else {
        s
    }
}

fn parse_union(expr: &str) -> Result<Vec<Term>, Error> {
    let inner = strip_parens(expr);
    let mut terms = Vec::new();
    for part in inner.split('|') {
        terms.push(parse_term(part.trim())?);
    }
    Ok(terms)
}

fn parse_term(part: &str) -> Result<Term, Error> {
    let part = part.strip_prefix("//").unwrap_or(part);
    match part {
        "." | "" => Ok(Term {
            step: Step::AllNodes,
            name: None,
        }),
        "@*" => Ok(Term {
            step: Step::AllAttributes,
            name: None,
        }),
        "namespace::*" => Ok(Term {
            step: Step::AllNamespaces,
            name: None,
        }),
        "*" => Ok(Term {
            step: Step::ElementsNamed,
            name: None,
        }),
        name if is_ncname(name) => Ok(Term {
            step: Step::ElementsNamed,
            name: Some(name.to_string()),
        }),
        other => Err(Error::QueryError(format!(
            "unsupported XPath step: {other:?}"
        ))),
    }
}

fn is_ncname(s: &str) -> bool {
    !s.is_empty()
        && s.chars().next().unwrap().is_alphabetic()
        && s.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
}

/// Apply every term of a union in a single tree walk, so that an element's
/// own `Node` item lands immediately before the `Namespace` items selected
/// on it — the adjacency `NodeSet::namespaces_following` depends on — rather
/// than in three disjoint per-term blocks. Node order among the terms
/// doesn't matter (`Node` entries are deduplicated by identity regardless of
/// which term produced them); only the node/namespace adjacency does, since
/// attribute items don't need to be contiguous with anything.
fn apply_terms(doc: &Document, terms: &[Term], set: &mut NodeSet) {
    let root = doc.root();
    for node in descendants_in_order(doc, root) {
        let value_type = doc.value_type(node);
        let mut select_node = false;
        let mut select_namespaces = false;
        let mut select_attributes = false;

        for term in terms {
            match term.step {
                Step::AllNodes => select_node |= value_type != ValueType::Document,
                Step::ElementsNamed => {
                    if value_type == ValueType::Element {
                        let matches = match &term.name {
                            Some(name) => doc.element(node).unwrap().name.local_name == *name,
                            None => true,
                        };
                        select_node |= matches;
                    }
                }
                Step::AllAttributes => select_attributes = true,
                Step::AllNamespaces => select_namespaces = true,
            }
        }

        if select_node {
            set.push_node(node);
        }
        if let Some(element) = doc.element(node) {
            if select_namespaces {
                for decl in &element.namespaces {
                    set.push_namespace(node, decl.prefix.clone());
                }
            }
            if select_attributes {
                for attr in &element.attributes {
                    set.push_attribute(
                        node,
                        attr.name.local_name.clone(),
                        attr.name.namespace_uri.clone(),
                    );
                }
            }
        }
    }
}

fn descendants_in_order(doc: &Document, node: Node) -> Vec<Node> {
    let mut out = Vec::new();
    // collect in document order via an explicit stack, consistent with the
    // canonicalizer's own walker rather than recursion.
    let mut frames: Vec<(Node, usize)> = vec![(node, 0)];
    while let Some((current, idx)) = frames.pop() {
        if idx == 0 {
            out.push(current);
        }
        if let Some(child) = doc.nth_child(current, idx) {
            frames.push((current, idx + 1));
            frames.push((child, 0));
        }
    }
    out
}

/// Pure node-set difference (`A - B`): an item survives iff it is not
/// itself a member of `excluded` — a literal identity check, not a subtree
/// removal. Callers who want to drop an entire subtree spell that out on
/// the right-hand side the same way the XMLDSig worked examples do (listing
/// the element, its descendants, its attributes, and its namespace nodes
/// explicitly), rather than relying on this function to infer it.
fn subtract(set: &NodeSet, excluded: &NodeSet) -> NodeSet {
    let mut result = NodeSet::new();
    for item in set.iter() {
        match item {
            crate::nodeset::NodeSetItem::Node(node) => {
                if !excluded.contains_node(*node) {
                    result.push_node(*node);
                }
            }
            crate::nodeset::NodeSetItem::Namespace { element, prefix } => {
                if !excluded.contains_namespace(*element, prefix) {
                    result.push_namespace(*element, prefix.clone());
                }
            }
            crate::nodeset::NodeSetItem::Attribute {
                element,
                local_name,
                namespace_uri,
            } => {
                if !excluded.contains_attribute(*element, local_name, namespace_uri) {
                    result.push_attribute(*element, local_name.clone(), namespace_uri.clone());
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn whole_document_union_selects_every_node_and_namespace() {
        let doc = parse(r#"<a xmlns:x="urn:x"><b x:y="1"/></a>"#).unwrap();
        let set = evaluate(
            &doc,
            "(//. | //@* | //namespace::*)",
            &XPathContext::document(),
        )
        .unwrap();
        assert!(set.len() > 0);
        let root = doc.document_element().unwrap();
        assert!(set.contains_node(root));
        assert!(set.contains_namespace(root, "x"));
    }

    #[test]
    fn subtraction_drops_matching_subtree() {
        let doc = parse(r#"<a><b/><c/></a>"#).unwrap();
        let set = evaluate(&doc, "(//.) - (//c)", &XPathContext::document()).unwrap();
        let root = doc.document_element().unwrap();
        let c = doc.children(root).nth(1).unwrap();
        assert!(set.contains_node(root));
        assert!(!set.contains_node(c));
    }

    #[test]
    fn unsupported_syntax_is_a_query_error() {
        let doc = parse("<a/>").unwrap();
        let err = evaluate(&doc, "//a[1]", &XPathContext::document()).unwrap_err();
        assert!(matches!(err, Error::QueryError(_)));
    }

    #[test]
    fn node_and_namespace_union_keeps_them_adjacent_per_element() {
        let doc = parse(r#"<a xmlns:x="urn:x"><b x:y="1"/></a>"#).unwrap();
        let set = evaluate(
            &doc,
            "(//. | //@* | //namespace::*)",
            &XPathContext::document(),
        )
        .unwrap();
        let root = doc.document_element().unwrap();
        let following: Vec<_> = set.namespaces_following(root).collect();
        assert_eq!(following, vec!["x"]);
    }
}

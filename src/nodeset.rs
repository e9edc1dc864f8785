//! Node-sets: an ordered selection of nodes identifying the subset to
//! canonicalize, plus the namespace and attribute pseudo-nodes selected on
//! particular elements (attributes have no arena identity of their own —
//! see `value.rs` — so their node-set membership is tracked by owner +
//! qualified name instead).
//!
//! Membership is by node identity, not structural equality; since
//! [`crate::tree::Node`] is already a thin wrapper around an
//! `indextree::NodeId`, equality on it *is* identity, so an `ahash` hash set
//! gives O(1) identity membership for free.

use ahash::{AHashMap, AHashSet};

use crate::tree::Node;

/// One entry of a node-set: either a regular tree node, or a namespace
/// declaration or attribute "selected" on a particular element, which is
/// only meaningful as an entry of a node-set rather than standing alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeSetItem {
    Node(Node),
    /// A namespace declaration for `prefix` as visible on `element`.
    Namespace { element: Node, prefix: String },
    /// An attribute node, identified by its owner plus qualified identity
    /// (attributes have no arena identity of their own — see `value.rs`).
    Attribute {
        element: Node,
        local_name: String,
        namespace_uri: String,
    },
}

/// An ordered, identity-based collection of selected nodes, attributes, and
/// namespace declarations, in document order.
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    items: Vec<NodeSetItem>,
    nodes: AHashSet<Node>,
    namespaces: AHashMap<Node, AHashSet<String>>,
    attributes: AHashMap<Node, AHashSet<(String, String)>>,
}

impl NodeSet {
    pub fn new() -> Self {
        NodeSet::default()
    }

    pub fn push_node(&mut self, node: Node) {
        if self.nodes.insert(node) {
            self.items.push(NodeSetItem::Node(node));
        }
    }

    pub fn push_namespace(&mut self, element: Node, prefix: impl Into<String>) {
        let prefix = prefix.into();
        if self
            .namespaces
            .entry(element)
            .or_default()
            .insert(prefix.clone())
        {
            self.items.push(NodeSetItem::Namespace { element, prefix });
        }
    }

    pub fn push_attribute(
        &mut self,
        element: Node,
        local_name: impl Into<String>,
        namespace_uri: impl Into<String>,
    ) {
        let local_name = local_name.into();
        let namespace_uri = namespace_uri.into();
        if self
            .attributes
            .entry(element)
            .or_default()
            .insert((local_name.clone(), namespace_uri.clone()))
        {
            self.items.push(NodeSetItem::Attribute {
                element,
                local_name,
                namespace_uri,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NodeSetItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeSetItem> + '_ {
        self.items.iter()
    }

    /// Whether `node` itself (not a namespace selected on it) is in the set.
    pub fn contains_node(&self, node: Node) -> bool {
        self.nodes.contains(&node)
    }

    /// Whether the namespace declaration for `prefix` is selected on
    /// `element`.
    pub fn contains_namespace(&self, element: Node, prefix: &str) -> bool {
        self.namespaces
            .get(&element)
            .is_some_and(|set| set.contains(prefix))
    }

    /// Whether the attribute `(local_name, namespace_uri)` on `element` is
    /// selected. Subset attribute emission is per-attribute, not implied by
    /// the owning element's membership.
    pub fn contains_attribute(&self, element: Node, local_name: &str, namespace_uri: &str) -> bool {
        self.attributes.get(&element).is_some_and(|set| {
            set.contains(&(local_name.to_string(), namespace_uri.to_string()))
        })
    }

    /// Index of `node` among the `Node` entries of the set in document
    /// order, used to find the run of `Namespace` items immediately
    /// following an element's own entry in the subset case.
    pub fn index_of_node(&self, node: Node) -> Option<usize> {
        self.items.iter().position(|item| match item {
            NodeSetItem::Node(n) => *n == node,
            NodeSetItem::Namespace { .. } => false,
        })
    }

    /// The namespace prefixes selected on `element`, in the order they were
    /// inserted, immediately following `element`'s own `Node` entry (as
    /// produced by a document-order query like `//namespace::*`).
    pub fn namespaces_following(&self, element: Node) -> impl Iterator<Item = &str> + '_ {
        let start = self.index_of_node(element).map(|i| i + 1).unwrap_or(0);
        self.items[start..]
            .iter()
            .take_while(move |item| {
                matches!(item, NodeSetItem::Namespace { element: e, .. } if *e == element)
            })
            .map(|item| match item {
                NodeSetItem::Namespace { prefix, .. } => prefix.as_str(),
                NodeSetItem::Node(_) => unreachable!(),
            })
    }
}

//! The read-only tree the canonicalizer consumes: a [`Node`] handle wrapping
//! an `indextree::NodeId`, and a [`Document`] owning the backing arena plus
//! parent/child/ancestor traversal primitives over it.

use indextree::{Arena, NodeId};

use crate::error::Error;
use crate::value::{Element, Value, ValueType};

/// A lightweight handle to a node in a [`Document`]. Cheap to copy; only
/// valid for the `Document` it was obtained from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node(pub(crate) NodeId);

impl Node {
    #[inline]
    pub(crate) fn new(id: NodeId) -> Self {
        Node(id)
    }

    #[inline]
    pub(crate) fn id(&self) -> NodeId {
        self.0
    }
}

/// An immutable XML document tree.
///
/// `Document` owns an [`indextree::Arena`] whose root node is a synthetic
/// [`Value::Document`] marker; its children are the top-level nodes: at
/// most one element, any number of comments and processing instructions,
/// and at most one `DocType`.
#[derive(Debug)]
pub struct Document {
    pub(crate) arena: Arena<Value>,
    pub(crate) root: NodeId,
}

impl Document {
    pub(crate) fn with_arena(arena: Arena<Value>, root: NodeId) -> Self {
        Document { arena, root }
    }

    /// The synthetic document root. Its children are the top-level nodes.
    pub fn root(&self) -> Node {
        Node::new(self.root)
    }

    pub fn value(&self, node: Node) -> &Value {
        self.arena[node.id()].get()
    }

    pub fn value_type(&self, node: Node) -> ValueType {
        self.value(node).value_type()
    }

    pub fn element(&self, node: Node) -> Option<&Element> {
        self.value(node).as_element()
    }

    /// The document's single root element.
    pub fn document_element(&self) -> Result<Node, Error> {
        self.children(self.root())
            .find(|n| self.value_type(*n) == ValueType::Element)
            .ok_or(Error::MissingRootElement)
    }

    pub fn parent(&self, node: Node) -> Option<Node> {
        self.arena[node.id()].parent().map(Node::new)
    }

    pub fn children(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.id().children(&self.arena).map(Node::new)
    }

    pub fn child_count(&self, node: Node) -> usize {
        self.children(node).count()
    }

    pub fn nth_child(&self, node: Node, index: usize) -> Option<Node> {
        self.children(node).nth(index)
    }

    /// Ancestors of `node`, nearest first, not including `node` itself.
    pub fn ancestors(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.id().ancestors(&self.arena).skip(1).map(Node::new)
    }

    /// Index of `child` in `node`'s child list, `None` if not a child.
    pub fn child_index(&self, node: Node, child: Node) -> Option<usize> {
        self.children(node).position(|n| n == child)
    }

    /// The nearest ancestor of `node` (possibly `node` itself, never the
    /// document root) that is an element.
    pub fn nearest_element(&self, node: Node) -> Option<Node> {
        if self.value_type(node) == ValueType::Element {
            return Some(node);
        }
        self.ancestors(node)
            .find(|n| self.value_type(*n) == ValueType::Element)
    }

    /// Namespace URI bound to `prefix` by walking `node`'s ancestor chain,
    /// consulting each element's own namespace declarations (the tree's
    /// own in-scope-namespace view, independent of any scope tracker the
    /// canonicalizer maintains while traversing). Used to resolve `xmlns`
    /// inheritance when a default namespace must be undeclared.
    pub fn namespace_uri_in_scope(&self, node: Node, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(crate::namespace_scope::XML_NAMESPACE_URI);
        }
        let mut current = Some(node);
        while let Some(n) = current {
            if let Some(element) = self.element(n) {
                if let Some(decl) = element.namespaces.iter().find(|d| d.prefix == prefix) {
                    return Some(&decl.uri);
                }
            }
            current = self.parent(n);
        }
        None
    }
}

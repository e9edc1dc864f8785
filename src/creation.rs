//! A small builder for constructing a [`Document`] programmatically,
//! mainly used by tests that need precise control over attribute types,
//! namespace declarations, or node-set membership that a text fixture
//! parsed through [`crate::parse::parse`] cannot express directly.
//!
//! Builds nodes in the arena directly and appends them under a running
//! cursor, tracked as a stack of open elements so `end()` always closes the
//! most recently opened one.

use indextree::{Arena, NodeId};

use crate::error::Error;
use crate::tree::Document;
use crate::value::{
    Attribute, AttributeType, DocType, Element, NamespaceDecl, ProcessingInstruction, QName, Value,
};

pub struct DocumentBuilder {
    arena: Arena<Value>,
    root: NodeId,
    stack: Vec<NodeId>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(Value::Document);
        DocumentBuilder {
            arena,
            root,
            stack: vec![root],
        }
    }

    fn current(&self) -> NodeId {
        *self.stack.last().expect("builder stack is never empty")
    }

    fn append(&mut self, value: Value) -> NodeId {
        let id = self.arena.new_node(value);
        self.current().append(id, &mut self.arena);
        id
    }

    /// Open an element and make it the insertion point for subsequent
    /// calls, until the matching [`Self::end`].
    pub fn element(&mut self, name: QName) -> &mut Self {
        let id = self.append(Value::Element(Element::new(name)));
        self.stack.push(id);
        self
    }

    /// Convenience for an unprefixed, unnamespaced element name.
    pub fn element_local(&mut self, local_name: &str) -> &mut Self {
        self.element(QName::local(local_name))
    }

    /// Close the element opened by the last unmatched [`Self::element`].
    pub fn end(&mut self) -> &mut Self {
        assert!(self.stack.len() > 1, "end() without matching element()");
        self.stack.pop();
        self
    }

    pub fn attribute(&mut self, attribute: Attribute) -> &mut Self {
        self.current_element_mut().attributes.push(attribute);
        self
    }

    pub fn attribute_local(&mut self, local_name: &str, value: &str) -> &mut Self {
        self.attribute(Attribute::new(QName::local(local_name), value))
    }

    pub fn namespace(&mut self, prefix: &str, uri: &str) -> &mut Self {
        self.current_element_mut()
            .namespaces
            .push(NamespaceDecl::new(prefix, uri));
        self
    }

    fn current_element_mut(&mut self) -> &mut Element {
        let current = self.current();
        match self.arena[current].get_mut() {
            Value::Element(e) => e,
            _ => panic!("attribute()/namespace() called outside an element"),
        }
    }

    pub fn text(&mut self, content: impl Into<String>) -> &mut Self {
        self.append(Value::Text(content.into()));
        self
    }

    pub fn comment(&mut self, content: impl Into<String>) -> Result<&mut Self, Error> {
        let content = content.into();
        if content.contains("--") {
            return Err(Error::InvalidComment(content));
        }
        self.append(Value::Comment(content));
        Ok(self)
    }

    pub fn pi(&mut self, target: impl Into<String>, data: Option<String>) -> &mut Self {
        self.append(Value::ProcessingInstruction(ProcessingInstruction {
            target: target.into(),
            data,
        }));
        self
    }

    pub fn doctype(&mut self, name: impl Into<String>) -> &mut Self {
        self.append(Value::DocType(DocType {
            name: name.into(),
            public_id: None,
            system_id: None,
        }));
        self
    }

    pub fn finish(self) -> Result<Document, Error> {
        assert_eq!(self.stack.len(), 1, "unclosed element() in builder");
        let document = Document::with_arena(self.arena, self.root);
        document.document_element()?;
        Ok(document)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn attr_typed(local_name: &str, value: &str, attr_type: AttributeType) -> Attribute {
    Attribute::new(QName::local(local_name), value).with_type(attr_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_document() {
        let mut builder = DocumentBuilder::new();
        builder
            .element_local("a")
            .namespace("", "http://example/")
            .element_local("b")
            .attribute_local("x", "1")
            .end()
            .end();
        let doc = builder.finish().unwrap();
        let root = doc.document_element().unwrap();
        assert_eq!(doc.element(root).unwrap().namespaces.len(), 1);
        let child = doc.children(root).next().unwrap();
        assert_eq!(doc.element(child).unwrap().name.local_name, "b");
    }

    #[test]
    fn finish_requires_balanced_elements() {
        let mut builder = DocumentBuilder::new();
        builder.element_local("a");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| builder.finish()));
        assert!(result.is_err());
    }
}

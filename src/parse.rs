//! A small, non-validating XML reader that turns a string into a
//! [`Document`] tree, so the canonicalizer can be exercised against text
//! fixtures without an externally supplied parser.
//!
//! Tokenizes with `xmlparser` and threads a [`NamespaceScope`] through
//! element/attribute name resolution as it goes, resolving each name
//! directly to an owned `QName` rather than through an interned id table —
//! this reader only ever resolves each name once, so interning would buy
//! nothing.

use indextree::{Arena, NodeId};
use xmlparser::{ElementEnd, Token, Tokenizer};

use crate::entity::parse_predefined_entities;
use crate::error::Error;
use crate::namespace_scope::{NamespaceScope, XMLNS_NAMESPACE_URI, XML_NAMESPACE_URI};
use crate::tree::Document;
use crate::value::{
    Attribute, AttributeType, DocType, Element, NamespaceDecl, ProcessingInstruction, QName, Value,
};

struct PendingElement {
    prefix: String,
    local: String,
    namespaces: Vec<NamespaceDecl>,
    attributes: Vec<(String, String, String)>, // (prefix, local, raw value)
}

impl PendingElement {
    fn new(prefix: &str, local: &str) -> Self {
        PendingElement {
            prefix: prefix.to_string(),
            local: local.to_string(),
            namespaces: Vec::new(),
            attributes: Vec::new(),
        }
    }
}

struct Builder {
    arena: Arena<Value>,
    root: NodeId,
    current: NodeId,
    scope: NamespaceScope,
    pending: Option<PendingElement>,
}

impl Builder {
    fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(Value::Document);
        let mut scope = NamespaceScope::new();
        scope.push_context();
        Builder {
            arena,
            root,
            current: root,
            scope,
            pending: None,
        }
    }

    fn append(&mut self, value: Value) -> NodeId {
        let id = self.arena.new_node(value);
        self.current.append(id, &mut self.arena);
        id
    }

    fn start_element(&mut self, prefix: &str, local: &str) {
        self.pending = Some(PendingElement::new(prefix, local));
    }

    fn namespace_decl(&mut self, prefix: &str, uri: &str) {
        self.pending
            .as_mut()
            .expect("namespace declaration outside an element")
            .namespaces
            .push(NamespaceDecl::new(prefix, uri));
    }

    fn attribute(&mut self, prefix: &str, local: &str, value: &str) -> Result<(), Error> {
        let value = parse_predefined_entities(value.into())?.into_owned();
        self.pending
            .as_mut()
            .expect("attribute outside an element")
            .attributes
            .push((prefix.to_string(), local.to_string(), value));
        Ok(())
    }

    fn resolve(&self, prefix: &str) -> Option<String> {
        self.scope.uri(prefix).map(str::to_string)
    }

    fn open_element(&mut self) -> Result<NodeId, Error> {
        let pending = self.pending.take().expect("open without start");
        self.scope.push_context();
        for decl in &pending.namespaces {
            let prefix = if decl.prefix.is_empty() {
                ""
            } else {
                decl.prefix.as_str()
            };
            self.scope.declare_prefix(prefix, &decl.uri);
        }

        let namespace_uri = if pending.prefix.is_empty() {
            self.resolve("").unwrap_or_default()
        } else {
            self.resolve(&pending.prefix)
                .ok_or_else(|| Error::UnknownPrefix(pending.prefix.clone()))?
        };
        let name = QName::new(
            non_empty(&pending.prefix),
            pending.local.clone(),
            namespace_uri,
        );
        let mut element = Element::new(name);
        element.namespaces = pending.namespaces;

        for (prefix, local, value) in pending.attributes {
            let namespace_uri = if prefix.is_empty() {
                String::new()
            } else {
                self.resolve(&prefix)
                    .ok_or_else(|| Error::UnknownPrefix(prefix.clone()))?
            };
            let attr_name = QName::new(non_empty(&prefix), local, namespace_uri);
            if element.get_attribute(&attr_name.local_name, &attr_name.namespace_uri).is_some() {
                return Err(Error::DuplicateAttribute(attr_name.qualified()));
            }
            element
                .attributes
                .push(Attribute::new(attr_name, value).with_type(AttributeType::Undeclared));
        }

        let id = self.append(Value::Element(element));
        self.current = id;
        Ok(id)
    }

    fn close_element(&mut self) {
        self.scope.pop_context();
        self.current = self
            .arena
            .get(self.current)
            .and_then(|n| n.parent())
            .expect("closing the document root");
    }

    fn text(&mut self, text: &str) -> Result<(), Error> {
        let text = parse_predefined_entities(text.into())?;
        if text.is_empty() {
            return Ok(());
        }
        self.append(Value::Text(text.into_owned()));
        Ok(())
    }

    fn cdata(&mut self, text: &str) {
        self.append(Value::Text(text.to_string()));
    }

    fn comment(&mut self, text: &str) -> Result<(), Error> {
        if text.contains("--") {
            return Err(Error::InvalidComment(text.to_string()));
        }
        self.append(Value::Comment(text.to_string()));
        Ok(())
    }

    fn processing_instruction(&mut self, target: &str, data: Option<&str>) {
        self.append(Value::ProcessingInstruction(ProcessingInstruction {
            target: target.to_string(),
            data: data.filter(|d| !d.is_empty()).map(str::to_string),
        }));
    }

    fn doctype(&mut self, name: &str) {
        self.append(Value::DocType(DocType {
            name: name.to_string(),
            public_id: None,
            system_id: None,
        }));
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Parse `xml` into a [`Document`].
///
/// This is a non-validating reader: it does not fetch or interpret external
/// DTD subsets, and it records at most the document type's name (DOCTYPE
/// content is never part of canonical output anyway).
pub fn parse(xml: &str) -> Result<Document, Error> {
    let mut builder = Builder::new();

    for token in Tokenizer::from(xml) {
        match token? {
            Token::Declaration { .. } => {}
            Token::ProcessingInstruction { target, content, .. } => {
                builder.processing_instruction(target.as_str(), content.as_ref().map(|c| c.as_str()));
            }
            Token::Comment { text, .. } => {
                builder.comment(text.as_str())?;
            }
            Token::DtdStart { name, .. } | Token::EmptyDtd { name, .. } => {
                builder.doctype(name.as_str());
            }
            Token::EntityDeclaration { .. } | Token::DtdEnd { .. } => {}
            Token::ElementStart { prefix, local, .. } => {
                builder.start_element(prefix.as_str(), local.as_str());
            }
            Token::Attribute { prefix, local, value, .. } => {
                if prefix.as_str() == "xmlns" {
                    builder.namespace_decl(local.as_str(), value.as_str());
                } else if prefix.as_str().is_empty() && local.as_str() == "xmlns" {
                    builder.namespace_decl("", value.as_str());
                } else {
                    builder.attribute(prefix.as_str(), local.as_str(), value.as_str())?;
                }
            }
            Token::ElementEnd { end, .. } => match end {
                ElementEnd::Open => {
                    builder.open_element()?;
                }
                ElementEnd::Close(_, _) => {
                    builder.close_element();
                }
                ElementEnd::Empty => {
                    builder.open_element()?;
                    builder.close_element();
                }
            },
            Token::Text { text } => {
                builder.text(text.as_str())?;
            }
            Token::Cdata { text, .. } => {
                builder.cdata(text.as_str());
            }
        }
    }

    let Builder { arena, root, .. } = builder;
    let document = Document::with_arena(arena, root);
    document.document_element()?;
    Ok(document)
}

/// The URIs every document has bound implicitly, for callers that want to
/// pre-seed a [`NamespaceScope`] the same way the parser does.
pub const IMPLICIT_BINDINGS: [(&str, &str); 2] =
    [("xml", XML_NAMESPACE_URI), ("xmlns", XMLNS_NAMESPACE_URI)];

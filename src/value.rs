//! The node values stored in a [`crate::tree::Document`] arena.
//!
//! Attributes and namespace declarations are folded directly into `Element`
//! as ordered vectors rather than modelled as separate arena nodes: the
//! canonicalizer only ever reads them in bulk, so a node-per-attribute
//! indirection would only add lookups without buying anything back.

use std::fmt;

/// The declared type of an attribute, per the XML `ATTLIST` enumeration.
/// Without a DTD, a parser cannot know these; such attributes are
/// `Undeclared` and treated as `CData` for escaping purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttributeType {
    #[default]
    Undeclared,
    CData,
    Id,
    IdRef,
    IdRefs,
    NmToken,
    NmTokens,
    Entity,
    Entities,
    Notation,
}

impl AttributeType {
    /// Whether this type is whitespace-normalized before escaping.
    pub fn is_tokenized(self) -> bool {
        !matches!(self, AttributeType::Undeclared | AttributeType::CData)
    }
}

/// A qualified name: local name plus the namespace it resolves to, and the
/// prefix it was written with (kept only for round-tripping through a
/// parser; the canonicalizer never trusts it over the namespace URI).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: Option<String>,
    pub local_name: String,
    pub namespace_uri: String,
}

impl QName {
    pub fn new(prefix: Option<String>, local_name: String, namespace_uri: String) -> Self {
        QName {
            prefix,
            local_name,
            namespace_uri,
        }
    }

    /// Unprefixed name in no namespace.
    pub fn local(local_name: impl Into<String>) -> Self {
        QName {
            prefix: None,
            local_name: local_name.into(),
            namespace_uri: String::new(),
        }
    }

    /// The name as it would be written out: `prefix:local` or `local`.
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}:{}", self.local_name),
            _ => self.local_name.clone(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified())
    }
}

/// A namespace declaration made *on* an element: `xmlns[:prefix]="uri"`.
///
/// `prefix` is the empty string for the default namespace declaration.
/// `uri` may be empty, meaning "undeclare the default namespace" (only
/// legal when `prefix` is empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceDecl {
    pub prefix: String,
    pub uri: String,
}

impl NamespaceDecl {
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        NamespaceDecl {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.prefix.is_empty()
    }
}

/// An XML attribute (never a namespace-declaration pseudo-attribute; those
/// are `NamespaceDecl`s).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
    pub attr_type: AttributeType,
}

impl Attribute {
    pub fn new(name: QName, value: impl Into<String>) -> Self {
        Attribute {
            name,
            value: value.into(),
            attr_type: AttributeType::Undeclared,
        }
    }

    pub fn with_type(mut self, attr_type: AttributeType) -> Self {
        self.attr_type = attr_type;
        self
    }
}

/// An XML element: qualified name, its own attributes and namespace
/// declarations (both in document/declaration order), and its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    pub name: QName,
    pub attributes: Vec<Attribute>,
    pub namespaces: Vec<NamespaceDecl>,
}

impl Element {
    pub fn new(name: QName) -> Self {
        Element {
            name,
            attributes: Vec::new(),
            namespaces: Vec::new(),
        }
    }

    pub fn get_attribute(&self, local_name: &str, namespace_uri: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name.local_name == local_name && a.name.namespace_uri == namespace_uri)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessingInstruction {
    pub target: String,
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocType {
    pub name: String,
    pub public_id: Option<String>,
    pub system_id: Option<String>,
}

/// The value held by a single arena node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// The synthetic root of the tree; its children are the document's
    /// top-level nodes.
    Document,
    Element(Element),
    Text(String),
    Comment(String),
    ProcessingInstruction(ProcessingInstruction),
    DocType(DocType),
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ValueType {
    Document,
    Element,
    Text,
    Comment,
    ProcessingInstruction,
    DocType,
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Document => ValueType::Document,
            Value::Element(_) => ValueType::Element,
            Value::Text(_) => ValueType::Text,
            Value::Comment(_) => ValueType::Comment,
            Value::ProcessingInstruction(_) => ValueType::ProcessingInstruction,
            Value::DocType(_) => ValueType::DocType,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Value::Element(e) => Some(e),
            _ => None,
        }
    }
}

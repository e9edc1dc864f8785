#![forbid(unsafe_code)]

//! `xml-c14n` serializes an in-memory XML tree into one of the four W3C
//! Canonical XML forms — the byte-exact normal form typically fed to a
//! cryptographic digest ahead of an XML signature.
//!
//! ```rust
//! use xml_c14n::{parse, Canonicalizer};
//!
//! let doc = parse(r#"<a xmlns:x="urn:x" x:y="1"/>"#).unwrap();
//! let mut out: Vec<u8> = Vec::new();
//! let mut c14n = Canonicalizer::new(&mut out, false, false);
//! c14n.write(&doc).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     r#"<a xmlns:x="urn:x" x:y="1"></a>"#
//! );
//! ```

mod algorithm;
mod canon;
mod creation;
mod entity;
mod error;
mod escape;
mod namespace_scope;
mod nodeset;
mod ordering;
mod parse;
#[cfg(feature = "proptest")]
pub mod proptest;
mod tree;
mod value;
mod xpath;

pub use algorithm::{Algorithm, EXCLUSIVE, EXCLUSIVE_WITH_COMMENTS, INCLUSIVE, INCLUSIVE_WITH_COMMENTS};
pub use canon::{canonicalize_subset_to_string, canonicalize_to_string, Canonicalizer};
pub use creation::{attr_typed, DocumentBuilder};
pub use error::Error;
pub use namespace_scope::NamespaceScope;
pub use nodeset::{NodeSet, NodeSetItem};
pub use parse::parse;
pub use tree::{Document, Node};
pub use value::{
    Attribute, AttributeType, DocType, Element, NamespaceDecl, ProcessingInstruction, QName, Value,
    ValueType,
};
pub use xpath::{evaluate as evaluate_xpath, XPathContext};

//! Proptest support for `xml-c14n`.
//!
//! Enabled via the `proptest` feature: generate an arbitrary [`Document`] and
//! use it in a property test, e.g. to check that canonicalization is
//! idempotent under reparsing (`c14n(parse(c14n(d))) == c14n(d)`).
//!
//! ```toml
//! [dev-dependencies]
//! xml-c14n = { path = "...", features = ["proptest"] }
//! ```
//!
//! Builds an intermediate `Fixed*` tree via a recursive proptest strategy,
//! then converts it to a real [`Document`] via [`crate::creation::DocumentBuilder`].
//! Element and attribute names are left unprefixed: canonicalization has no
//! prefix-minting step of its own to stress, and a generator that mints
//! syntactically valid, self-consistent namespace bindings is substantially
//! more machinery than the idempotency property this module exists to drive
//! needs.

use proptest::prelude::*;

use crate::creation::DocumentBuilder;
use crate::tree::Document;

const ELEMENT_NAMES: &[&str] = &["a", "b", "c", "d", "e"];
const ATTRIBUTE_NAMES: &[&str] = &["p", "q", "r"];
const PI_NAMES: &[&str] = &["pi1", "pi2", "pi3"];
/// Printable ASCII plus a few Latin-1 characters, short enough that proptest
/// shrinking stays useful; deliberately excludes raw `\r` since a conforming
/// parser normalizes it to `\n` before we'd ever see it (XML 1.0 §2.11), so
/// no well-formed reparse can reproduce one.
const TEXT: &str = "[ -~\u{a0}-\u{ff}]{0,12}";

enum FixedContent {
    Text(String),
    Comment(String),
    ProcessingInstruction(String, Option<String>),
    Element(FixedElement),
}

struct FixedElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<FixedContent>,
}

enum FixedRootContent {
    Comment(String),
    ProcessingInstruction(String, Option<String>),
}

struct FixedRoot {
    before: Vec<FixedRootContent>,
    document_element: FixedElement,
    after: Vec<FixedRootContent>,
}

fn arb_attribute() -> impl Strategy<Value = (String, String)> {
    (prop::sample::select(ATTRIBUTE_NAMES), TEXT)
        .prop_map(|(name, value)| (name.to_string(), value))
}

fn arb_comment() -> impl Strategy<Value = String> {
    TEXT.prop_filter("comment", |s| !s.contains("--"))
}

fn arb_processing_instruction() -> impl Strategy<Value = (String, Option<String>)> {
    (
        prop::sample::select(PI_NAMES),
        prop::option::of(TEXT.prop_filter("non-empty", |s| !s.is_empty())),
    )
        .prop_map(|(target, data)| (target.to_string(), data))
}

fn arb_fixed_content() -> impl Strategy<Value = FixedContent> {
    let leaf = prop_oneof![
        TEXT.prop_filter("non-empty", |s| !s.is_empty())
            .prop_map(FixedContent::Text),
        arb_comment().prop_map(FixedContent::Comment),
        arb_processing_instruction()
            .prop_map(|(target, data)| FixedContent::ProcessingInstruction(target, data)),
    ];

    leaf.prop_recursive(6, 64, 8, |inner| {
        (
            prop::sample::select(ELEMENT_NAMES),
            prop::collection::vec(arb_attribute(), 0..3),
            prop::collection::vec(inner, 0..6),
        )
            .prop_map(|(name, attributes, children)| {
                FixedContent::Element(FixedElement {
                    name: name.to_string(),
                    attributes: unduplicate(&attributes),
                    children,
                })
            })
    })
}

fn arb_fixed_element() -> impl Strategy<Value = FixedElement> {
    (
        prop::sample::select(ELEMENT_NAMES),
        prop::collection::vec(arb_attribute(), 0..3),
        prop::collection::vec(arb_fixed_content(), 0..6),
    )
        .prop_map(|(name, attributes, children)| FixedElement {
            name: name.to_string(),
            attributes: unduplicate(&attributes),
            children,
        })
}

fn unduplicate(attributes: &[(String, String)]) -> Vec<(String, String)> {
    let mut seen = std::collections::HashSet::new();
    attributes
        .iter()
        .filter(|(name, _)| seen.insert(name.clone()))
        .cloned()
        .collect()
}

/// Generate an arbitrary [`Document`]: a single root element with
/// unprefixed, unnamespaced attributes, text, comments, and processing
/// instruction children, plus prolog/epilog comments and PIs.
pub fn arb_document() -> impl Strategy<Value = Document> {
    let root_content = prop::collection::vec(
        prop_oneof![
            arb_comment().prop_map(FixedRootContent::Comment),
            arb_processing_instruction()
                .prop_map(|(target, data)| FixedRootContent::ProcessingInstruction(target, data)),
        ],
        0..3,
    );
    (root_content.clone(), arb_fixed_element(), root_content)
        .prop_map(|(before, document_element, after)| {
            build(FixedRoot {
                before,
                document_element,
                after,
            })
        })
}

fn build(root: FixedRoot) -> Document {
    let mut builder = DocumentBuilder::new();
    for content in &root.before {
        push_root_content(&mut builder, content);
    }
    push_element(&mut builder, &root.document_element);
    for content in &root.after {
        push_root_content(&mut builder, content);
    }
    builder.finish().expect("generated tree is well-formed by construction")
}

fn push_root_content(builder: &mut DocumentBuilder, content: &FixedRootContent) {
    match content {
        FixedRootContent::Comment(text) => {
            builder.comment(text.clone()).expect("filtered to exclude '--'");
        }
        FixedRootContent::ProcessingInstruction(target, data) => {
            builder.pi(target.clone(), data.clone());
        }
    }
}

fn push_element(builder: &mut DocumentBuilder, element: &FixedElement) {
    builder.element_local(&element.name);
    for (name, value) in &element.attributes {
        builder.attribute_local(name, value);
    }
    for child in &element.children {
        match child {
            FixedContent::Text(text) => {
                builder.text(text.clone());
            }
            FixedContent::Comment(text) => {
                builder.comment(text.clone()).expect("filtered to exclude '--'");
            }
            FixedContent::ProcessingInstruction(target, data) => {
                builder.pi(target.clone(), data.clone());
            }
            FixedContent::Element(child) => push_element(builder, child),
        }
    }
    builder.end();
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn arbitrary_document_always_builds(doc in arb_document()) {
            prop_assert!(doc.document_element().is_ok());
        }
    }
}

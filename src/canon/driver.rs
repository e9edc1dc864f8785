//! The document driver: prolog/epilog newline placement around the root
//! element. Iterates top-level document children in order, writing each
//! prolog/epilog comment or processing instruction followed by a newline,
//! before handing the root element subtree to the element walker.

use std::io::Write;

use crate::algorithm::Algorithm;
use crate::canon::walker::{in_subset, walk_element};
use crate::error::Error;
use crate::namespace_scope::NamespaceScope;
use crate::nodeset::NodeSet;
use crate::tree::Document;
use crate::value::ValueType;

/// Serialize `doc` (optionally restricted to `node_set`) to `sink`,
/// applying `algorithm`. Flushes `sink` before returning.
pub fn write_document<W: Write>(
    doc: &Document,
    node_set: Option<&NodeSet>,
    algorithm: Algorithm,
    sink: &mut W,
) -> Result<(), Error> {
    let mut scope = NamespaceScope::new();
    scope.push_context();

    doc.document_element()?;
    let mut seen_root = false;

    for child in doc.children(doc.root()) {
        match doc.value_type(child) {
            ValueType::Element => {
                walk_element(doc, child, &mut scope, node_set, algorithm, sink)?;
                seen_root = true;
            }
            ValueType::Comment => {
                write_prolog_epilog_comment(doc, child, node_set, algorithm, seen_root, sink)?;
            }
            ValueType::ProcessingInstruction => {
                write_prolog_epilog_pi(doc, child, node_set, seen_root, sink)?;
            }
            ValueType::DocType | ValueType::Text | ValueType::Document => {}
        }
    }

    sink.flush().map_err(Error::IoError)
}

fn write_prolog_epilog_comment<W: Write>(
    doc: &Document,
    node: crate::tree::Node,
    node_set: Option<&NodeSet>,
    algorithm: Algorithm,
    after_root: bool,
    sink: &mut W,
) -> Result<(), Error> {
    if !algorithm.with_comments() || !in_subset(node_set, node) {
        return Ok(());
    }
    let crate::value::Value::Comment(text) = doc.value(node) else {
        return Ok(());
    };
    if after_root {
        write!(sink, "\n<!--{text}-->").map_err(Error::IoError)
    } else {
        write!(sink, "<!--{text}-->\n").map_err(Error::IoError)
    }
}

fn write_prolog_epilog_pi<W: Write>(
    doc: &Document,
    node: crate::tree::Node,
    node_set: Option<&NodeSet>,
    after_root: bool,
    sink: &mut W,
) -> Result<(), Error> {
    if !in_subset(node_set, node) {
        return Ok(());
    }
    let crate::value::Value::ProcessingInstruction(pi) = doc.value(node) else {
        return Ok(());
    };
    let rendered = match &pi.data {
        Some(data) => format!("<?{} {}?>", pi.target, data),
        None => format!("<?{}?>", pi.target),
    };
    if after_root {
        write!(sink, "\n{rendered}").map_err(Error::IoError)
    } else {
        write!(sink, "{rendered}\n").map_err(Error::IoError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn prolog_and_epilog_comments_with_with_comments_scenario_7() {
        let doc = parse(r#"<?xml-stylesheet href="s.css"?><!--hi--><r/><!--bye-->"#).unwrap();
        let mut out = Vec::new();
        write_document(&doc, None, Algorithm::InclusiveWithComments, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<?xml-stylesheet href=\"s.css\"?>\n<!--hi-->\n<r></r>\n<!--bye-->"
        );
    }

    #[test]
    fn comments_are_dropped_without_with_comments() {
        let doc = parse(r#"<!--hi--><r/>"#).unwrap();
        let mut out = Vec::new();
        write_document(&doc, None, Algorithm::Inclusive, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<r></r>");
    }

    #[test]
    fn missing_root_element_is_an_error() {
        use indextree::Arena;
        let mut arena = Arena::new();
        let root = arena.new_node(crate::value::Value::Document);
        let doc = Document::with_arena(arena, root);
        let mut out = Vec::new();
        let err = write_document(&doc, None, Algorithm::Inclusive, &mut out).unwrap_err();
        assert!(matches!(err, Error::MissingRootElement));
    }
}

//! The element walker: an explicit-stack depth-first traversal that drives
//! `writeStartTag`/`writeEndTag` and dispatches children to their own output
//! rules. Uses a start/end-edge walk over an explicit frame stack rather
//! than plain recursion, so traversal depth is bounded by heap rather than
//! by the call stack.

use std::io::{self, Write};

use crate::algorithm::Algorithm;
use crate::canon::attributes;
use crate::canon::namespaces;
use crate::error::Error;
use crate::escape::{escape_attribute_value, escape_cdata_attribute, escape_text};
use crate::namespace_scope::NamespaceScope;
use crate::nodeset::NodeSet;
use crate::ordering::sort_attributes;
use crate::tree::{Document, Node};
use crate::value::ValueType;

struct Frame {
    node: Node,
    next_child: usize,
}

pub fn in_subset(node_set: Option<&NodeSet>, node: Node) -> bool {
    match node_set {
        None => true,
        Some(set) => set.contains_node(node),
    }
}

/// Walk the subtree rooted at `root` (an element), writing it to `sink`.
pub fn walk_element<W: Write>(
    doc: &Document,
    root: Node,
    scope: &mut NamespaceScope,
    node_set: Option<&NodeSet>,
    algorithm: Algorithm,
    sink: &mut W,
) -> Result<(), Error> {
    write_start_tag(doc, root, scope, node_set, algorithm, sink)?;
    let mut stack = vec![Frame {
        node: root,
        next_child: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let node = frame.node;
        if frame.next_child >= doc.child_count(node) {
            write_end_tag(doc, node, scope, node_set, sink)?;
            stack.pop();
            continue;
        }
        let child = doc
            .nth_child(node, frame.next_child)
            .expect("next_child bound-checked above");
        frame.next_child += 1;

        match doc.value_type(child) {
            ValueType::Element => {
                write_start_tag(doc, child, scope, node_set, algorithm, sink)?;
                stack.push(Frame {
                    node: child,
                    next_child: 0,
                });
            }
            ValueType::Text => write_text(doc, child, node_set, sink)?,
            ValueType::Comment => write_comment(doc, child, node_set, algorithm, sink)?,
            ValueType::ProcessingInstruction => write_pi(doc, child, node_set, sink)?,
            ValueType::Document | ValueType::DocType => {}
        }
    }

    Ok(())
}

fn write_start_tag<W: Write>(
    doc: &Document,
    element: Node,
    scope: &mut NamespaceScope,
    node_set: Option<&NodeSet>,
    algorithm: Algorithm,
    sink: &mut W,
) -> Result<(), Error> {
    // Every element visited pushes a scope frame, selected or not — an
    // excluded ancestor still opens and closes a (possibly empty) frame so
    // nested elements see the scope exactly as an emitting walk would.
    scope.push_context();

    if !in_subset(node_set, element) {
        return Ok(());
    }

    let value = doc.element(element).ok_or(Error::NotAnElement)?;
    let attrs = attributes::collect(doc, element, node_set, algorithm)?;
    let decls = namespaces::declarations_to_emit(doc, element, value, scope, node_set, algorithm);

    write!(sink, "<{}", value.name.qualified()).map_err(io_error)?;
    for (prefix, uri) in &decls {
        write_namespace_decl(sink, prefix, uri)?;
        scope.declare_prefix(prefix, uri);
    }

    let mut attrs = attrs;
    sort_attributes(&mut attrs);
    for attr in &attrs {
        write!(
            sink,
            " {}=\"{}\"",
            attr.name.qualified(),
            escape_attribute_value(&attr.value, attr.attr_type)
        )
        .map_err(io_error)?;
    }

    write!(sink, ">").map_err(io_error)?;
    Ok(())
}

fn write_end_tag<W: Write>(
    doc: &Document,
    element: Node,
    scope: &mut NamespaceScope,
    node_set: Option<&NodeSet>,
    sink: &mut W,
) -> Result<(), Error> {
    if in_subset(node_set, element) {
        let value = doc.element(element).ok_or(Error::NotAnElement)?;
        write!(sink, "</{}>", value.name.qualified()).map_err(io_error)?;
    }
    scope.pop_context();
    Ok(())
}

fn write_namespace_decl<W: Write>(sink: &mut W, prefix: &str, uri: &str) -> Result<(), Error> {
    let escaped = escape_cdata_attribute(uri);
    if prefix.is_empty() {
        write!(sink, " xmlns=\"{escaped}\"").map_err(io_error)
    } else {
        write!(sink, " xmlns:{prefix}=\"{escaped}\"").map_err(io_error)
    }
}

fn write_text<W: Write>(
    doc: &Document,
    node: Node,
    node_set: Option<&NodeSet>,
    sink: &mut W,
) -> Result<(), Error> {
    if !in_subset(node_set, node) {
        return Ok(());
    }
    if let crate::value::Value::Text(text) = doc.value(node) {
        write!(sink, "{}", escape_text(text)).map_err(io_error)?;
    }
    Ok(())
}

fn write_comment<W: Write>(
    doc: &Document,
    node: Node,
    node_set: Option<&NodeSet>,
    algorithm: Algorithm,
    sink: &mut W,
) -> Result<(), Error> {
    if !algorithm.with_comments() || !in_subset(node_set, node) {
        return Ok(());
    }
    if let crate::value::Value::Comment(text) = doc.value(node) {
        write!(sink, "<!--{text}-->").map_err(io_error)?;
    }
    Ok(())
}

fn write_pi<W: Write>(
    doc: &Document,
    node: Node,
    node_set: Option<&NodeSet>,
    sink: &mut W,
) -> Result<(), Error> {
    if !in_subset(node_set, node) {
        return Ok(());
    }
    if let crate::value::Value::ProcessingInstruction(pi) = doc.value(node) {
        match &pi.data {
            Some(data) => write!(sink, "<?{} {}?>", pi.target, data).map_err(io_error)?,
            None => write!(sink, "<?{}?>", pi.target).map_err(io_error)?,
        }
    }
    Ok(())
}

fn io_error(err: io::Error) -> Error {
    Error::IoError(err)
}

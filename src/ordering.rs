//! The attribute comparator: a pure strict weak ordering, plus a stable sort
//! built on top of it. Kept as its own tiny module so the ordering rule is
//! testable in isolation from the walker that calls it.

use std::cmp::Ordering;

use crate::value::Attribute;

/// Order two attributes: unprefixed (no namespace) attributes first, then
/// by namespace URI, then by local name — all codepoint order.
pub fn compare_attributes(a: &Attribute, b: &Attribute) -> Ordering {
    let a_uri = a.name.namespace_uri.as_str();
    let b_uri = b.name.namespace_uri.as_str();
    if a_uri == b_uri {
        a.name.local_name.cmp(&b.name.local_name)
    } else if a_uri.is_empty() {
        Ordering::Less
    } else if b_uri.is_empty() {
        Ordering::Greater
    } else {
        a_uri.cmp(b_uri)
    }
}

/// Sort `attributes` into canonical order. Stable: attributes that compare
/// equal keep their relative input order, which can only happen for
/// well-formed elements if the tree was built with a duplicate attribute
/// (a safety net, not a reachable case from a conforming parser).
pub fn sort_attributes(attributes: &mut [Attribute]) {
    attributes.sort_by(compare_attributes);
}

//! The namespace scope tracker: a stack of prefix→URI dictionaries
//! maintained as the element walker enters and leaves elements, used to
//! decide whether a declaration on the current element is redundant. Each
//! frame is an overlay of bindings pushed on entry and popped on exit, with
//! lookups falling through to enclosing frames.

use ahash::AHashMap;

pub const XML_NAMESPACE_URI: &str = "http://www.w3.org/XML/1998/namespace";
pub const XMLNS_NAMESPACE_URI: &str = "http://www.w3.org/2000/xmlns/";

/// A stack of namespace binding frames, one per open element.
///
/// `xml` and `xmlns` are permanent, implicit bindings and are
/// never considered redundant declarations because they can never be
/// declared by the input in the first place (a conforming tree never holds
/// an `xmlns:xml` or `xmlns:xmlns` declaration).
#[derive(Debug, Clone)]
pub struct NamespaceScope {
    frames: Vec<AHashMap<String, String>>,
}

impl NamespaceScope {
    pub fn new() -> Self {
        NamespaceScope { frames: Vec::new() }
    }

    /// Enter a new element: push an empty frame above the current scope.
    pub fn push_context(&mut self) {
        self.frames.push(AHashMap::new());
    }

    /// Leave the element whose frame is on top.
    pub fn pop_context(&mut self) {
        self.frames.pop();
    }

    /// Record `prefix -> uri` on the innermost (current) frame.
    pub fn declare_prefix(&mut self, prefix: &str, uri: &str) {
        if let Some(top) = self.frames.last_mut() {
            top.insert(prefix.to_string(), uri.to_string());
        }
    }

    /// The innermost binding for `prefix`, or `None` if it has never been
    /// bound in the current scope (not even to the empty URI).
    pub fn uri(&self, prefix: &str) -> Option<&str> {
        match prefix {
            "xml" => return Some(XML_NAMESPACE_URI),
            "xmlns" => return Some(XMLNS_NAMESPACE_URI),
            _ => {}
        }
        for frame in self.frames.iter().rev() {
            if let Some(uri) = frame.get(prefix) {
                return Some(uri);
            }
        }
        None
    }
}

impl Default for NamespaceScope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_prefix_always_bound() {
        let scope = NamespaceScope::new();
        assert_eq!(scope.uri("xml"), Some(XML_NAMESPACE_URI));
    }

    #[test]
    fn unbound_prefix_is_none() {
        let mut scope = NamespaceScope::new();
        scope.push_context();
        assert_eq!(scope.uri("a"), None);
    }

    #[test]
    fn inner_frame_shadows_outer() {
        let mut scope = NamespaceScope::new();
        scope.push_context();
        scope.declare_prefix("a", "urn:outer");
        scope.push_context();
        scope.declare_prefix("a", "urn:inner");
        assert_eq!(scope.uri("a"), Some("urn:inner"));
        scope.pop_context();
        assert_eq!(scope.uri("a"), Some("urn:outer"));
    }

    #[test]
    fn empty_uri_is_a_real_binding_not_absence() {
        let mut scope = NamespaceScope::new();
        scope.push_context();
        scope.declare_prefix("", "urn:default");
        scope.push_context();
        scope.declare_prefix("", "");
        assert_eq!(scope.uri(""), Some(""));
        scope.pop_context();
        assert_eq!(scope.uri(""), Some("urn:default"));
    }
}

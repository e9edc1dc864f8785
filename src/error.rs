use std::fmt;

#[derive(Debug)]
pub enum Error {
    // canonicalizer construction / dispatch
    /// The output sink failed.
    IoError(std::io::Error),
    /// `new_with_algorithm` was given a URI that is none of the four c14n
    /// algorithm identifiers.
    UnknownAlgorithm(String),
    /// `new_with_algorithm` was given no URI at all.
    NullAlgorithm,
    /// The XPath expression passed to the subset entry point is not
    /// syntactically valid (or uses a construct the evaluator doesn't cover).
    QueryError(String),
    /// Canonical output was not valid UTF-8 — unreachable for a tree built
    /// from a conforming parser or `DocumentBuilder`, but surfaced rather
    /// than unwrapped since the canonicalizer never validates text content.
    Utf8Error(std::str::Utf8Error),

    // tree errors
    /// A document must have exactly one root element.
    MissingRootElement,
    /// Operation expected an element node.
    NotAnElement,
    /// An element declared the same attribute name twice.
    DuplicateAttribute(String),
    /// A comment contains `--`, which is illegal in XML.
    InvalidComment(String),
    /// A processing instruction target was empty or literally `xml`.
    InvalidTarget(String),
    /// indextree reported an inconsistency (stale or foreign `Node`).
    NodeError(indextree::NodeError),

    // parser errors
    UnclosedTag,
    InvalidCloseTag(String, String),
    UnclosedEntity(String),
    InvalidEntity(String),
    UnknownPrefix(String),
    Parser(xmlparser::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "output sink failed: {e}"),
            Error::UnknownAlgorithm(uri) => write!(f, "unknown c14n algorithm URI: {uri}"),
            Error::NullAlgorithm => write!(f, "no c14n algorithm URI given"),
            Error::QueryError(msg) => write!(f, "invalid XPath expression: {msg}"),
            Error::Utf8Error(e) => write!(f, "canonical output was not valid UTF-8: {e}"),
            Error::MissingRootElement => write!(f, "document has no root element"),
            Error::NotAnElement => write!(f, "node is not an element"),
            Error::DuplicateAttribute(name) => write!(f, "duplicate attribute: {name}"),
            Error::InvalidComment(text) => write!(f, "comment contains '--': {text}"),
            Error::InvalidTarget(target) => {
                write!(f, "invalid processing instruction target: {target}")
            }
            Error::NodeError(e) => write!(f, "tree inconsistency: {e}"),
            Error::UnclosedTag => write!(f, "unclosed tag"),
            Error::InvalidCloseTag(open, close) => {
                write!(f, "close tag </{close}> does not match open tag <{open}>")
            }
            Error::UnclosedEntity(e) => write!(f, "unclosed entity reference: &{e}"),
            Error::InvalidEntity(e) => write!(f, "unknown entity reference: &{e};"),
            Error::UnknownPrefix(p) => write!(f, "unknown namespace prefix: {p}"),
            Error::Parser(e) => write!(f, "XML parse error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(e: std::io::Error) -> Self {
        Error::IoError(e)
    }
}

impl From<indextree::NodeError> for Error {
    #[inline]
    fn from(e: indextree::NodeError) -> Self {
        Error::NodeError(e)
    }
}

impl From<xmlparser::Error> for Error {
    #[inline]
    fn from(e: xmlparser::Error) -> Self {
        Error::Parser(e)
    }
}

//! The canonicalizer itself: ties the document driver, element walker,
//! attribute collector, and namespace declaration selector together behind
//! the public `Canonicalizer` entry point, which owns a `Write` sink and
//! offers both a streaming and a string-returning entry point.

mod attributes;
mod driver;
mod namespaces;
mod walker;

use std::io::Write;

use crate::algorithm::Algorithm;
use crate::error::Error;
use crate::tree::Document;
use crate::xpath::{evaluate, XPathContext};

/// Serializes XML trees into one of the four canonical forms.
///
/// A `Canonicalizer` owns the output sink for the duration of a `write`
/// call and assumes exclusive access to it; it holds no state between
/// calls beyond the chosen algorithm.
pub struct Canonicalizer<W: Write> {
    sink: W,
    algorithm: Algorithm,
}

impl<W: Write> Canonicalizer<W> {
    /// Construct from the `(with_comments, exclusive)` flag pair.
    pub fn new(sink: W, with_comments: bool, exclusive: bool) -> Self {
        Canonicalizer {
            sink,
            algorithm: Algorithm::new(with_comments, exclusive),
        }
    }

    /// Construct from one of the four algorithm URIs, rejecting anything
    /// else with `UnknownAlgorithm` and a missing URI with `NullAlgorithm`.
    pub fn new_with_algorithm(sink: W, algorithm_uri: Option<&str>) -> Result<Self, Error> {
        Ok(Canonicalizer {
            sink,
            algorithm: Algorithm::from_uri(algorithm_uri)?,
        })
    }

    /// Serialize the entire document.
    pub fn write(&mut self, document: &Document) -> Result<(), Error> {
        driver::write_document(document, None, self.algorithm, &mut self.sink)
    }

    /// Resolve `xpath_expression` against `document` via the built-in query
    /// evaluator and serialize only the resulting subset, returning
    /// `QueryError` on a syntactically invalid expression.
    pub fn write_subset(
        &mut self,
        document: &Document,
        xpath_expression: &str,
        xpath_context: &XPathContext,
    ) -> Result<(), Error> {
        let node_set = evaluate(document, xpath_expression, xpath_context)?;
        driver::write_document(document, Some(&node_set), self.algorithm, &mut self.sink)
    }

    /// Consume the canonicalizer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Serialize `document` with `algorithm` and return the canonical bytes as
/// a `String`, for callers that don't need to manage a sink themselves.
pub fn canonicalize_to_string(document: &Document, algorithm: Algorithm) -> Result<String, Error> {
    let mut sink = Vec::new();
    driver::write_document(document, None, algorithm, &mut sink)?;
    String::from_utf8(sink).map_err(|e| Error::Utf8Error(e.utf8_error()))
}

/// As [`canonicalize_to_string`], restricted to the subset selected by
/// `xpath_expression`/`xpath_context`.
pub fn canonicalize_subset_to_string(
    document: &Document,
    algorithm: Algorithm,
    xpath_expression: &str,
    xpath_context: &XPathContext,
) -> Result<String, Error> {
    let node_set = evaluate(document, xpath_expression, xpath_context)?;
    let mut sink = Vec::new();
    driver::write_document(document, Some(&node_set), algorithm, &mut sink)?;
    String::from_utf8(sink).map_err(|e| Error::Utf8Error(e.utf8_error()))
}

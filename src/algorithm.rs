//! The four W3C canonicalization algorithms, identified by URI.

use crate::error::Error;

pub const INCLUSIVE: &str = "http://www.w3.org/TR/2001/REC-xml-c14n-20010315";
pub const INCLUSIVE_WITH_COMMENTS: &str =
    "http://www.w3.org/TR/2001/REC-xml-c14n-20010315#WithComments";
pub const EXCLUSIVE: &str = "http://www.w3.org/2001/10/xml-exc-c14n#";
pub const EXCLUSIVE_WITH_COMMENTS: &str = "http://www.w3.org/2001/10/xml-exc-c14n#WithComments";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Inclusive,
    InclusiveWithComments,
    Exclusive,
    ExclusiveWithComments,
}

impl Algorithm {
    pub fn new(with_comments: bool, exclusive: bool) -> Self {
        match (exclusive, with_comments) {
            (false, false) => Algorithm::Inclusive,
            (false, true) => Algorithm::InclusiveWithComments,
            (true, false) => Algorithm::Exclusive,
            (true, true) => Algorithm::ExclusiveWithComments,
        }
    }

    /// Resolve a URI to one of the four algorithms.
    pub fn from_uri(uri: Option<&str>) -> Result<Self, Error> {
        let uri = uri.ok_or(Error::NullAlgorithm)?;
        match uri {
            INCLUSIVE => Ok(Algorithm::Inclusive),
            INCLUSIVE_WITH_COMMENTS => Ok(Algorithm::InclusiveWithComments),
            EXCLUSIVE => Ok(Algorithm::Exclusive),
            EXCLUSIVE_WITH_COMMENTS => Ok(Algorithm::ExclusiveWithComments),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }

    pub fn uri(self) -> &'static str {
        match self {
            Algorithm::Inclusive => INCLUSIVE,
            Algorithm::InclusiveWithComments => INCLUSIVE_WITH_COMMENTS,
            Algorithm::Exclusive => EXCLUSIVE,
            Algorithm::ExclusiveWithComments => EXCLUSIVE_WITH_COMMENTS,
        }
    }

    pub fn with_comments(self) -> bool {
        matches!(
            self,
            Algorithm::InclusiveWithComments | Algorithm::ExclusiveWithComments
        )
    }

    pub fn exclusive(self) -> bool {
        matches!(self, Algorithm::Exclusive | Algorithm::ExclusiveWithComments)
    }
}

use thiserror::Error;

/// Broad category of a parse failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied parameters were rejected before touching the document.
    Validation,
    /// A required field was missing or had the wrong shape.
    Extraction,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("invalid sort_by {0:?}: expected one of new, rising, controversial, top")]
    InvalidSortBy(String),

    #[error("missing field '{0}'")]
    MissingField(String),

    #[error("field '{field}' is not {expected}")]
    WrongType { field: String, expected: &'static str },

    #[error("index {index} out of range for '{field}'")]
    MissingIndex { field: String, index: usize },

    #[error("invalid count {0:?}: expected an integer")]
    InvalidCount(String),

    #[error("listing has no posts to take the next-page subreddit from")]
    EmptyListing,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidSortBy(_) => ErrorKind::Validation,
            _ => ErrorKind::Extraction,
        }
    }

    pub(crate) fn wrong_type(field: &str, expected: &'static str) -> Self {
        ParseError::WrongType { field: field.to_string(), expected }
    }
}

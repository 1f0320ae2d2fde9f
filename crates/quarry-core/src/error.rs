//! Error types for quarry-core.

use crate::types::DocumentKind;

/// Errors raised by the document store and id handling.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("a {kind} with id {id} already exists")]
    DuplicateId { kind: DocumentKind, id: String },

    #[error("invalid document id {0:?}: expected 17 url-safe base64 characters")]
    InvalidId(String),

    #[error("unknown document kind {0:?}: expected `post` or `comment`")]
    UnknownKind(String),
}

/// Request-validation failures reported before a query reaches the parser.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("didn't specify a query string, use ?query=")]
    MissingQuery,
}

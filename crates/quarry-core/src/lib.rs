//! quarry-core: query language and document store for quarry.
//!
//! This crate owns everything between a raw search string and the subset of
//! posts or comments it selects. Nothing here performs I/O.
//!
//! # Pipeline
//!
//! ```text
//! raw string ──► query::parse ──► ParsedQuery ──► filter::compile ──► Vec<Operation>
//!                                                                         │
//!                                     DocumentStore::search / filter::apply ◄┘
//! ```
//!
//! Parsing and compiling are pure and infallible: any input, including the
//! empty string, yields a (possibly empty) operation list.

pub mod config;
pub mod error;
pub mod filter;
pub mod id;
pub mod query;
pub mod store;
pub mod types;

pub use error::{CoreError, SearchError};
pub use filter::{apply, compile, search, Compiler, Match, Operation, OperationKind, Text};
pub use id::DocumentId;
pub use query::{parse, ParsedQuery};
pub use store::DocumentStore;
pub use types::{Document, DocumentKind};

/// Guard for callers that receive the query as an optional request argument.
///
/// The parser itself never sees a missing query; the HTTP layer and CLI call
/// this first and report [`SearchError::MissingQuery`] upward.
pub fn require_query(query: Option<&str>) -> Result<&str, SearchError> {
    query.ok_or(SearchError::MissingQuery)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_query_accepts_empty_string() {
        assert_eq!(require_query(Some("")), Ok(""));
    }

    #[test]
    fn require_query_rejects_absent_argument() {
        assert_eq!(require_query(None), Err(SearchError::MissingQuery));
    }
}

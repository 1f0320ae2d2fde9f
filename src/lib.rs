//! quarry: search backend for forum posts and comments.
//!
//! The query language, compiler and store live in [`quarry_core`]; corpus
//! loading lives in [`quarry_feeds`]. This crate adds the HTTP surface and the
//! `quarry` binary.
//!
//! # Architecture
//!
//! ```text
//! Feeds ──► Store ◄── Search (parse ─► compile ─► apply) ◄── HTTP / CLI
//! ```
//!
//! The store is loaded once at startup and shared read-only between requests.

pub mod server;

pub use quarry_core::{
    apply, compile, config, parse, require_query, Compiler, CoreError, Document, DocumentId,
    DocumentKind, DocumentStore, Match, Operation, OperationKind, ParsedQuery, SearchError,
};

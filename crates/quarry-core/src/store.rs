//! Store: in-memory post and comment collections.
//!
//! The store is the search backend's source of truth. Collections keep
//! insertion order, which is also the order search results come back in.

use crate::{
    error::CoreError,
    filter::{apply, Operation},
    id::DocumentId,
    types::{Document, DocumentKind},
};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct DocumentStore {
    posts: Collection,
    comments: Collection,
}

#[derive(Debug, Default, Clone)]
struct Collection {
    docs: Vec<Document>,
    by_id: HashMap<DocumentId, usize>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection_mut(&mut self, kind: DocumentKind) -> &mut Collection {
        match kind {
            DocumentKind::Post => &mut self.posts,
            DocumentKind::Comment => &mut self.comments,
        }
    }

    fn collection_ref(&self, kind: DocumentKind) -> &Collection {
        match kind {
            DocumentKind::Post => &self.posts,
            DocumentKind::Comment => &self.comments,
        }
    }

    /// Add a document to the collection named by its `kind`. Ids are unique
    /// per collection.
    pub fn insert(&mut self, doc: Document) -> Result<(), CoreError> {
        let collection = self.collection_mut(doc.kind);
        if collection.by_id.contains_key(&doc.id) {
            return Err(CoreError::DuplicateId {
                kind: doc.kind,
                id: doc.id.to_string(),
            });
        }
        collection.by_id.insert(doc.id.clone(), collection.docs.len());
        collection.docs.push(doc);
        Ok(())
    }

    /// Insert every document, stopping at the first duplicate.
    pub fn extend(&mut self, docs: impl IntoIterator<Item = Document>) -> Result<(), CoreError> {
        docs.into_iter().try_for_each(|doc| self.insert(doc))
    }

    pub fn get(&self, kind: DocumentKind, id: &DocumentId) -> Option<&Document> {
        let collection = self.collection_ref(kind);
        collection.by_id.get(id).map(|&i| &collection.docs[i])
    }

    pub fn collection(&self, kind: DocumentKind) -> &[Document] {
        &self.collection_ref(kind).docs
    }

    pub fn len(&self, kind: DocumentKind) -> usize {
        self.collection_ref(kind).docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.docs.is_empty() && self.comments.docs.is_empty()
    }

    /// Narrow the `kind` collection by `ops`, starting from every document.
    pub fn search(&self, kind: DocumentKind, ops: &[Operation]) -> Vec<&Document> {
        let docs = self.collection(kind);
        let hits = apply(ops, docs);
        tracing::debug!(%kind, total = docs.len(), hits = hits.len(), "search applied");
        hits
    }
}

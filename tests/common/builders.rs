//! Test builders: ergonomic constructors for `Document` and `DocumentStore`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use fake::{faker::lorem::en::Words, Fake};
use quarry::{Document, DocumentId, DocumentKind, DocumentStore};

// ---------------------------------------------------------------------------
// DocumentBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Document`] test fixtures.
///
/// # Example
///
/// ```rust
/// let doc = DocumentBuilder::post("My Apple Orange Mango")
///     .title("My Fruit Post")
///     .id("aaaaaaaaaaaaaaaaa")
///     .score(5)
///     .build();
/// ```
pub struct DocumentBuilder {
    id: Option<DocumentId>,
    kind: DocumentKind,
    title: Option<String>,
    body: Option<String>,
    author: Option<String>,
    base_score: i64,
}

impl DocumentBuilder {
    pub fn new(kind: DocumentKind, body: impl Into<String>) -> Self {
        Self {
            id: None,
            kind,
            title: None,
            body: Some(body.into()),
            author: None,
            base_score: 1,
        }
    }

    pub fn post(body: impl Into<String>) -> Self {
        Self::new(DocumentKind::Post, body)
    }

    pub fn comment(body: impl Into<String>) -> Self {
        Self::new(DocumentKind::Comment, body)
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.parse().expect("test id must be 17 url-safe characters"));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn score(mut self, score: i64) -> Self {
        self.base_score = score;
        self
    }

    pub fn no_body(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn build(self) -> Document {
        let id = self.id.unwrap_or_else(|| {
            DocumentId::for_document(
                self.kind,
                self.title.as_deref(),
                self.author.as_deref(),
                self.body.as_deref(),
                None,
            )
        });
        Document {
            id,
            kind: self.kind,
            title: self.title,
            body: self.body,
            author: self.author,
            posted_at: None,
            base_score: self.base_score,
        }
    }
}

// ---------------------------------------------------------------------------
// Store helpers
// ---------------------------------------------------------------------------

/// Build a store from any mix of posts and comments.
pub fn store_of(docs: impl IntoIterator<Item = Document>) -> DocumentStore {
    let mut store = DocumentStore::new();
    store.extend(docs).expect("test documents must have unique ids");
    store
}

/// Lorem-ipsum filler with `marker` appended to every `every`-th body.
/// Lorem words are lowercase Latin, so markers outside that vocabulary are
/// only ever found where they were injected.
pub fn build_corpus(n: usize, marker: &str, every: usize) -> Vec<Document> {
    (0..n)
        .map(|i| {
            let words: Vec<String> = Words(4..12).fake();
            let mut body = words.join(" ");
            if i % every == 0 {
                body.push(' ');
                body.push_str(marker);
            }
            DocumentBuilder::post(body)
                .title(format!("post {i}"))
                .build()
        })
        .collect()
}

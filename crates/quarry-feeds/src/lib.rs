//! quarry-feeds: corpus sources for quarry.
//!
//! Each source reads raw bytes (a file or stdin), decodes them as either a
//! JSON array or JSON Lines, and produces [`quarry_core::Document`] values for
//! the store. The format is sniffed from the first non-whitespace byte: `[`
//! means an array, anything else is treated as one object per line.
//!
//! Records may omit `id`; one is derived from the content. The `kind` of every
//! record is forced to the collection being loaded.

pub mod file;
pub mod stdin;

use chrono::{DateTime, Utc};
use quarry_core::{CoreError, Document, DocumentId, DocumentKind, DocumentStore};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {kind} record on line {line}: {source}")]
    Json {
        kind: DocumentKind,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {kind} record on line {line}: {source}")]
    Record {
        kind: DocumentKind,
        line: usize,
        #[source]
        source: CoreError,
    },

    #[error(transparent)]
    Store(#[from] CoreError),
}

/// Wire shape of one post or comment in a corpus file.
#[derive(Debug, Deserialize)]
struct Record {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default, alias = "user")]
    author: Option<String>,
    #[serde(default)]
    posted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    base_score: i64,
}

impl Record {
    fn into_document(self, kind: DocumentKind, ids: &mut DerivedIds) -> Result<Document, CoreError> {
        let id = match self.id {
            Some(id) => id.parse()?,
            None => ids.next(DocumentId::for_document(
                kind,
                self.title.as_deref(),
                self.author.as_deref(),
                self.body.as_deref(),
                self.posted_at.as_ref(),
            )),
        };
        Ok(Document {
            id,
            kind,
            title: self.title,
            body: self.body,
            author: self.author,
            posted_at: self.posted_at,
            base_score: self.base_score,
        })
    }
}

/// Counts derived ids within one source so identical records stay distinct.
/// The first occurrence keeps the plain content hash.
#[derive(Debug, Default)]
struct DerivedIds {
    seen: HashMap<DocumentId, u64>,
}

impl DerivedIds {
    fn next(&mut self, base: DocumentId) -> DocumentId {
        let count = self.seen.entry(base.clone()).or_insert(0);
        let id = base.nth(*count);
        *count += 1;
        id
    }
}

/// Decode a whole corpus held in memory.
pub fn parse_documents(content: &str, kind: DocumentKind) -> Result<Vec<Document>, FeedError> {
    let mut ids = DerivedIds::default();

    if content.trim_start().starts_with('[') {
        let records: Vec<Record> = serde_json::from_str(content).map_err(|source| FeedError::Json {
            kind,
            line: source.line(),
            source,
        })?;
        return records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                record
                    .into_document(kind, &mut ids)
                    .map_err(|source| FeedError::Record { kind, line: i + 1, source })
            })
            .collect();
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let record: Record = serde_json::from_str(line).map_err(|source| FeedError::Json {
                kind,
                line: i + 1,
                source,
            })?;
            record
                .into_document(kind, &mut ids)
                .map_err(|source| FeedError::Record { kind, line: i + 1, source })
        })
        .collect()
}

/// Load a corpus from `source`; `-` reads stdin.
pub async fn load(source: &Path, kind: DocumentKind) -> Result<Vec<Document>, FeedError> {
    if source == Path::new("-") {
        stdin::load(kind).await
    } else {
        file::load(source, kind).await
    }
}

/// Build a store from optional post and comment corpora.
pub async fn load_store(
    posts: Option<&Path>,
    comments: Option<&Path>,
) -> Result<DocumentStore, FeedError> {
    let mut store = DocumentStore::new();
    for (kind, source) in DocumentKind::ALL.into_iter().zip([posts, comments]) {
        let Some(source) = source else { continue };
        let docs = load(source, kind).await?;
        tracing::info!(%kind, count = docs.len(), source = %source.display(), "loaded corpus");
        store.extend(docs)?;
    }
    Ok(store)
}

//! Stdin source: reads a corpus piped into the process until EOF.

use crate::{parse_documents, FeedError};
use quarry_core::{Document, DocumentKind};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

pub async fn load(kind: DocumentKind) -> Result<Vec<Document>, FeedError> {
    let mut content = String::new();
    tokio::io::stdin()
        .read_to_string(&mut content)
        .await
        .map_err(|source| FeedError::Io {
            path: PathBuf::from("<stdin>"),
            source,
        })?;
    parse_documents(&content, kind)
}

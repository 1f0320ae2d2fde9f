//! File source: reads a whole corpus file (JSON array or JSON Lines).

use crate::{parse_documents, FeedError};
use quarry_core::{Document, DocumentKind};
use std::path::Path;

pub async fn load(path: &Path, kind: DocumentKind) -> Result<Vec<Document>, FeedError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_documents(&content, kind)
}

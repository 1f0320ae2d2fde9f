//! Core types for quarry-core.
//!
//! This module defines the searchable [`Document`] and its [`DocumentKind`]
//! discriminant. Posts and comments share one shape: search only ever looks
//! at the `body`, everything else is carried through to the response.

use crate::{error::CoreError, filter::Text, id::DocumentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post or comment as held by the [`DocumentStore`](crate::DocumentStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Content-addressed 17-character id.
    pub id: DocumentId,
    pub kind: DocumentKind,
    /// Post title. Comments normally have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Markdown source of the post or comment. Absent bodies never match a
    /// non-empty search term.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub base_score: i64,
}

impl Text for Document {
    fn text(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Which collection a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Post,
    Comment,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Post, DocumentKind::Comment];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Post => "post",
            DocumentKind::Comment => "comment",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = CoreError;

    /// Accepts the singular and plural collection names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "post" | "posts" => Ok(DocumentKind::Post),
            "comment" | "comments" => Ok(DocumentKind::Comment),
            _ => Err(CoreError::UnknownKind(s.to_string())),
        }
    }
}

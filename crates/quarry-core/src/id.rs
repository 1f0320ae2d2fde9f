//! Content-addressed document ids.
//!
//! Every post and comment is keyed by a 17-character string: the SHA-256 of
//! its identifying content, url-safe base64 encoded without padding and
//! truncated. Ids are stable across loads, so a corpus re-imported without
//! explicit ids keeps the same keys.

use crate::{error::CoreError, types::DocumentKind};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of every document id, in characters.
pub const ID_LEN: usize = 17;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Hash `parts` into an id. Each part is length-prefixed before hashing so
    /// `["ab", "c"]` and `["a", "bc"]` produce different ids.
    pub fn derive(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part);
        }
        let mut encoded = URL_SAFE_NO_PAD.encode(hasher.finalize());
        encoded.truncate(ID_LEN);
        DocumentId(encoded)
    }

    /// Id for a document loaded without one.
    pub fn for_document(
        kind: DocumentKind,
        title: Option<&str>,
        author: Option<&str>,
        body: Option<&str>,
        posted_at: Option<&DateTime<Utc>>,
    ) -> Self {
        let posted_at = posted_at.map(|ts| ts.to_rfc3339()).unwrap_or_default();
        Self::derive(&[
            kind.as_str().as_bytes(),
            title.unwrap_or_default().as_bytes(),
            author.unwrap_or_default().as_bytes(),
            body.unwrap_or_default().as_bytes(),
            posted_at.as_bytes(),
        ])
    }

    /// Id for the `n`-th repeat of identical content. `n == 0` is `self`.
    pub fn nth(&self, n: u64) -> Self {
        if n == 0 {
            return self.clone();
        }
        Self::derive(&[self.0.as_bytes(), &n.to_le_bytes()])
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl std::str::FromStr for DocumentId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == ID_LEN && s.chars().all(is_id_char) {
            Ok(DocumentId(s.to_string()))
        } else {
            Err(CoreError::InvalidId(s.to_string()))
        }
    }
}

impl TryFrom<String> for DocumentId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derived_ids_are_seventeen_id_chars() {
        let id = DocumentId::derive(&[b"My Apple Orange Mango"]);
        assert_eq!(id.as_str().len(), ID_LEN);
        assert!(id.as_str().chars().all(is_id_char));
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = DocumentId::for_document(DocumentKind::Post, Some("t"), None, Some("b"), None);
        let b = DocumentId::for_document(DocumentKind::Post, Some("t"), None, Some("b"), None);
        assert_eq!(a, b);
    }

    #[test]
    fn kind_and_part_boundaries_change_the_id() {
        let post = DocumentId::for_document(DocumentKind::Post, None, None, Some("same"), None);
        let comment = DocumentId::for_document(DocumentKind::Comment, None, None, Some("same"), None);
        assert_ne!(post, comment);
        let alice = DocumentId::for_document(DocumentKind::Comment, None, Some("alice"), Some("+1"), None);
        let bob = DocumentId::for_document(DocumentKind::Comment, None, Some("bob"), Some("+1"), None);
        assert_ne!(alice, bob);
        assert_ne!(DocumentId::derive(&[b"ab", b"c"]), DocumentId::derive(&[b"a", b"bc"]));
    }

    #[test]
    fn repeats_get_distinct_valid_ids() {
        let base = DocumentId::for_document(DocumentKind::Comment, None, None, Some("+1"), None);
        assert_eq!(base.nth(0), base);
        let second = base.nth(1);
        let third = base.nth(2);
        assert_ne!(second, base);
        assert_ne!(third, second);
        assert_eq!(second, base.nth(1));
        assert!(second.as_str().parse::<DocumentId>().is_ok());
    }

    #[test]
    fn parse_validates_length_and_alphabet() {
        assert!("aaaaaaaaaaaaaaaaa".parse::<DocumentId>().is_ok());
        assert!("Ab-_0123456789xyz".parse::<DocumentId>().is_ok());
        assert_eq!(
            "short".parse::<DocumentId>(),
            Err(CoreError::InvalidId("short".into()))
        );
        assert!("aaaaaaaaaaaaaaaa+".parse::<DocumentId>().is_err());
        assert!("aaaaaaaaaaaaaaaaaa".parse::<DocumentId>().is_err());
    }

    #[test]
    fn serde_round_trips_as_plain_string() {
        let id: DocumentId = "bbbbbbbbbbbbbbbbb".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bbbbbbbbbbbbbbbbb\"");
        let back: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<DocumentId>("\"nope\"").is_err());
    }
}

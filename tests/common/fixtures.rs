//! Static corpora used across harnesses.

use crate::common::builders::DocumentBuilder;
use quarry::Document;
use std::io::Write;

/// The two-post forum fixture: one fruit post, one animal post.
pub fn fruit_and_animal_posts() -> Vec<Document> {
    vec![
        DocumentBuilder::post("My Apple Orange Mango")
            .id("aaaaaaaaaaaaaaaaa")
            .title("My Fruit Post")
            .score(5)
            .build(),
        DocumentBuilder::post("My Dog Cat Panda")
            .id("bbbbbbbbbbbbbbbbb")
            .title("My Animal Post")
            .score(12)
            .build(),
    ]
}

/// A handful of comments with varied casing, quoting and empty bodies.
pub fn sample_comments() -> Vec<Document> {
    vec![
        DocumentBuilder::comment("I love a good mango")
            .id("ccccccccccccccc01")
            .author("alice")
            .build(),
        DocumentBuilder::comment("Pandas are bears, not raccoons")
            .id("ccccccccccccccc02")
            .author("bob")
            .build(),
        DocumentBuilder::comment("\"agreed\"")
            .id("ccccccccccccccc03")
            .author("carol")
            .build(),
        DocumentBuilder::comment("")
            .id("ccccccccccccccc04")
            .build(),
        DocumentBuilder::comment("deleted")
            .id("ccccccccccccccc05")
            .no_body()
            .build(),
    ]
}

/// Same posts as [`fruit_and_animal_posts`], as JSON Lines.
pub const POSTS_JSONL: &str = r#"{"id":"aaaaaaaaaaaaaaaaa","title":"My Fruit Post","body":"My Apple Orange Mango","base_score":5}
{"id":"bbbbbbbbbbbbbbbbb","title":"My Animal Post","body":"My Dog Cat Panda","base_score":12}
"#;

/// Comments without ids, as a JSON array.
pub const COMMENTS_JSON: &str = r#"[
  {"body": "I love a good mango", "user": "alice"},
  {"body": "Pandas are bears, not raccoons", "author": "bob"}
]"#;

/// Write `content` to a temporary file that lives as long as the handle.
pub fn write_corpus(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp corpus");
    file.write_all(content.as_bytes()).expect("write temp corpus");
    file
}

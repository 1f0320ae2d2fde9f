//! Query parser: splits a raw search string into parameters, OR pairs and
//! AND terms.
//!
//! # Syntax
//!
//! A search string is a sequence of whitespace-separated expressions.
//!
//! | Form            | Meaning                                              |
//! |-----------------|------------------------------------------------------|
//! | `word`          | AND term: body must contain `word` (any case)        |
//! | `"word"`        | AND term matched exactly against the whole body      |
//! | `-word`         | AND term that must be absent                         |
//! | `left OR right` | OR pair: body contains either side                   |
//! | `key:value`     | parameter, collected but not used for filtering yet  |
//!
//! # Extraction order
//!
//! Extraction runs in three fixed passes, each deleting what it claimed
//! before the next one looks at the string:
//!
//! 1. parameters: any token with a colon that has text on both sides;
//! 2. OR pairs: `left OR right` with single spaces around an uppercase `OR`;
//! 3. AND terms: whatever tokens remain.
//!
//! Claimed text is replaced with nothing rather than a space. A token that is
//! both a parameter and the left side of an OR (`a:b OR c`) is therefore
//! always a parameter, and the leftover `OR` becomes an ordinary AND term.

use serde::Serialize;
use std::collections::BTreeMap;

/// The three token sets produced by [`parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    /// `keyword → argument`. A repeated keyword keeps its last argument.
    pub parameters: BTreeMap<String, String>,
    /// `(left, right)` expressions joined by `OR`, in source order.
    pub or_pairs: Vec<(String, String)>,
    /// Remaining expressions, in source order.
    pub and_terms: Vec<String>,
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() && self.or_pairs.is_empty() && self.and_terms.is_empty()
    }

    /// Re-serialize the non-parameter portion: AND terms first, then each pair
    /// as `left OR right`. Parameters are not written back.
    pub fn to_query_string(&self) -> String {
        self.and_terms
            .iter()
            .cloned()
            .chain(self.or_pairs.iter().map(|(l, r)| format!("{l} OR {r}")))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl std::str::FromStr for ParsedQuery {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s))
    }
}

/// Parse a raw search string. Never fails; the empty string yields an empty
/// [`ParsedQuery`].
pub fn parse(input: &str) -> ParsedQuery {
    let (parameters, residual) = extract_parameters(input);
    let (or_pairs, residual) = extract_or_pairs(&residual);
    let and_terms = residual.split_whitespace().map(str::to_string).collect();

    ParsedQuery {
        parameters,
        or_pairs,
        and_terms,
    }
}

// ---------------------------------------------------------------------------
// Scanning helpers
// ---------------------------------------------------------------------------

/// Byte spans `[start, end)` of every maximal run of non-whitespace.
fn token_spans(s: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in s.char_indices() {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some(i),
            (true, Some(st)) => {
                spans.push((st, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(st) = start {
        spans.push((st, s.len()));
    }
    spans
}

/// Copies `s` minus the claimed spans. Spans must be sorted and disjoint.
fn remove_spans(s: &str, claimed: &[(usize, usize)]) -> String {
    let mut residual = String::with_capacity(s.len());
    let mut cursor = 0;
    for &(start, end) in claimed {
        residual.push_str(&s[cursor..start]);
        cursor = end;
    }
    residual.push_str(&s[cursor..]);
    residual
}

/// Split `keyword:argument` at the first colon that has at least one
/// character on each side.
fn split_parameter(token: &str) -> Option<(&str, &str)> {
    token
        .match_indices(':')
        .map(|(i, _)| i)
        .find(|&i| i > 0 && i + 1 < token.len())
        .map(|i| (&token[..i], &token[i + 1..]))
}

// ---------------------------------------------------------------------------
// Passes
// ---------------------------------------------------------------------------

fn extract_parameters(input: &str) -> (BTreeMap<String, String>, String) {
    let mut parameters = BTreeMap::new();
    let mut claimed = Vec::new();

    for (start, end) in token_spans(input) {
        if let Some((keyword, argument)) = split_parameter(&input[start..end]) {
            parameters.insert(keyword.to_string(), argument.to_string());
            claimed.push((start, end));
        }
    }

    (parameters, remove_spans(input, &claimed))
}

const OR_SEPARATOR: &str = " OR ";

fn extract_or_pairs(input: &str) -> (Vec<(String, String)>, String) {
    let spans = token_spans(input);
    let mut pairs = Vec::new();
    let mut claimed = Vec::new();

    let mut i = 0;
    while i < spans.len() {
        let (left_start, left_end) = spans[i];
        // The separator puts the `OR` token at i + 1 and the right side at i + 2.
        let right = spans
            .get(i + 2)
            .filter(|&&(right_start, _)| {
                input[left_end..].starts_with(OR_SEPARATOR)
                    && right_start == left_end + OR_SEPARATOR.len()
            })
            .copied();

        match right {
            Some((right_start, right_end)) => {
                pairs.push((
                    input[left_start..left_end].to_string(),
                    input[right_start..right_end].to_string(),
                ));
                claimed.push((left_start, right_end));
                i += 3;
            }
            None => i += 1,
        }
    }

    (pairs, remove_spans(input, &claimed))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

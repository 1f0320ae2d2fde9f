//! Filter compiler: turns a [`ParsedQuery`] into an ordered list of
//! [`Operation`]s and applies them to a document collection.
//!
//! Operations are applied left to right, each one narrowing the working set:
//! an inclusive operation keeps documents its predicate matches, an exclusive
//! one keeps those it does not. Consecutive AND terms therefore intersect.
//! An OR pair is a single inclusive step whose predicate accepts either side;
//! there is no nesting beyond that.
//!
//! AND terms are compiled first, in source order, followed by OR pairs in
//! source order. The interleaving of the two in the query string is not
//! preserved, which cannot change the result since every step is an
//! intersection.

use crate::{config::SearchConfig, query::ParsedQuery};
use serde::Serialize;

/// Anything with a searchable text field.
///
/// An absent field behaves like the empty string: it matches an empty search
/// term and nothing else.
pub trait Text {
    fn text(&self) -> Option<&str>;
}

impl Text for str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl Text for String {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: Text + ?Sized> Text for &T {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }
}

// ---------------------------------------------------------------------------
// Compiled form
// ---------------------------------------------------------------------------

/// A text predicate. Serialized with a `mode` tag so storage backends can
/// translate it into their own filter language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Match {
    /// The whole text equals `value`. Case-insensitive unless
    /// `case_sensitive` is set.
    Exact {
        value: String,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        case_sensitive: bool,
    },
    /// The text contains `value` (already lowercased), ignoring case.
    Substring { value: String },
    Or { left: Box<Match>, right: Box<Match> },
}

impl Match {
    pub fn matches(&self, text: Option<&str>) -> bool {
        let text = text.unwrap_or_default();
        match self {
            Match::Exact {
                value,
                case_sensitive: true,
            } => text == value.as_str(),
            Match::Exact { value, .. } => text.to_lowercase() == value.to_lowercase(),
            Match::Substring { value } => text.to_lowercase().contains(value.as_str()),
            Match::Or { left, right } => left.matches(Some(text)) || right.matches(Some(text)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    And,
    Or,
}

/// One narrowing step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub kind: OperationKind,
    /// Keep documents that do *not* match. Always `false` for OR pairs.
    pub exclude: bool,
    #[serde(rename = "match")]
    pub predicate: Match,
}

impl Operation {
    /// Whether `doc` survives this step.
    pub fn admits<T: Text + ?Sized>(&self, doc: &T) -> bool {
        self.predicate.matches(doc.text()) != self.exclude
    }
}

// ---------------------------------------------------------------------------
// Compiler
// ---------------------------------------------------------------------------

/// Compiles parsed queries with a fixed set of matching options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    options: SearchConfig,
}

impl Compiler {
    pub fn new(options: SearchConfig) -> Self {
        Self { options }
    }

    pub fn compile(&self, parsed: &ParsedQuery) -> Vec<Operation> {
        if !parsed.parameters.is_empty() {
            tracing::debug!(parameters = ?parsed.parameters, "search parameters are not applied");
        }

        let and_ops = parsed.and_terms.iter().map(|term| {
            let (exclude, predicate) = self.term(term);
            Operation {
                kind: OperationKind::And,
                exclude,
                predicate,
            }
        });

        // A dash on either side of an OR is stripped and its exclusion dropped.
        let or_ops = parsed.or_pairs.iter().map(|(left, right)| Operation {
            kind: OperationKind::Or,
            exclude: false,
            predicate: Match::Or {
                left: Box::new(self.term(left).1),
                right: Box::new(self.term(right).1),
            },
        });

        let ops: Vec<_> = and_ops.chain(or_ops).collect();
        tracing::debug!(operations = ops.len(), "compiled search query");
        ops
    }

    /// Compile one expression into `(exclude, predicate)`.
    fn term(&self, expr: &str) -> (bool, Match) {
        let (exclude, term) = match expr.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, expr),
        };

        let predicate = if !term.is_empty() && term.starts_with('"') && term.ends_with('"') {
            let value = if self.options.exact_strip_quotes && term.len() >= 2 {
                &term[1..term.len() - 1]
            } else {
                term
            };
            Match::Exact {
                value: value.to_string(),
                case_sensitive: self.options.exact_case_sensitive,
            }
        } else {
            Match::Substring {
                value: term.to_lowercase(),
            }
        };

        (exclude, predicate)
    }
}

/// Compile with the default options: quotes kept, exact matches ignore case.
pub fn compile(parsed: &ParsedQuery) -> Vec<Operation> {
    Compiler::default().compile(parsed)
}

/// Narrow `docs` by each operation in turn. Input order is preserved.
pub fn apply<'a, D>(ops: &[Operation], docs: impl IntoIterator<Item = &'a D>) -> Vec<&'a D>
where
    D: Text + ?Sized + 'a,
{
    let mut working: Vec<&D> = docs.into_iter().collect();
    for op in ops {
        working.retain(|doc| op.admits(*doc));
    }
    working
}

/// Parse, compile with default options and apply in one call.
pub fn search<'a, D>(query: &str, docs: impl IntoIterator<Item = &'a D>) -> Vec<&'a D>
where
    D: Text + ?Sized + 'a,
{
    apply(&compile(&crate::query::parse(query)), docs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

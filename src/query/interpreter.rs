//! Normalization and dispatch
//!
//! `interpret` is the single entry point: normalize the input, walk the
//! rule table in declaration order, run the first matching rule's
//! extractor and builder. No match is a normal outcome, not an error.

use serde::Serialize;
use tracing::debug;

use super::pattern::{patterns, templates};
use super::QueryResult;
use crate::dataset::MockDataset;

/// Outcome of interpreting one query string.
#[derive(Debug, Clone, Serialize)]
pub enum Interpretation {
    Matched(QueryResult),
    Unmatched(UnmatchedQuery),
}

impl Interpretation {
    pub fn is_matched(&self) -> bool {
        matches!(self, Interpretation::Matched(_))
    }

    pub fn as_result(&self) -> Option<&QueryResult> {
        match self {
            Interpretation::Matched(r) => Some(r),
            Interpretation::Unmatched(_) => None,
        }
    }
}

/// No rule recognized the input. Carries the original text and the
/// template queries the caller can offer instead.
#[derive(Debug, Clone, Serialize)]
pub struct UnmatchedQuery {
    pub original: String,
    pub suggestions: Vec<String>,
}

/// Lowercase, map punctuation to spaces, collapse runs of whitespace.
/// "FIND Customers, who ordered..." and "find customers who ordered..."
/// normalize identically.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_space = true;
    for ch in input.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Interpret a free-text query against the dataset. First matching rule
/// wins; the builder applies its own defaults for parameters the
/// extractor did not find.
pub fn interpret(query: &str, dataset: &MockDataset) -> Interpretation {
    let normalized = normalize(query);
    if normalized.is_empty() {
        debug!("empty query after normalization");
        return unmatched(query);
    }

    for rule in patterns() {
        if rule.matches(&normalized) {
            let params = (rule.extract)(&normalized);
            debug!(pattern = rule.name, ?params, "query matched");
            let mut result = (rule.build)(dataset, &params);
            // Synonym rules share a builder; report the rule that fired.
            result.pattern = rule.name;
            return Interpretation::Matched(result);
        }
    }

    debug!(%normalized, "no pattern matched");
    unmatched(query)
}

fn unmatched(original: &str) -> Interpretation {
    Interpretation::Unmatched(UnmatchedQuery {
        original: original.to_string(),
        suggestions: templates(),
    })
}

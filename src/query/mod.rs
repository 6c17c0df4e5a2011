//! Pattern-matching query interpreter
//!
//! Maps a constrained natural-language sentence to one of a fixed set of
//! result builders over the in-memory mock dataset. There is no query
//! language here by design: recognition is substring containment over a
//! normalized sentence, tried against an ordered rule table.

mod builders;
mod interpreter;
mod pattern;
mod value;

pub use interpreter::{interpret, normalize, Interpretation, UnmatchedQuery};
pub use pattern::{patterns, templates, Params, QueryPattern};
pub use value::{ResultTable, Row, ScalarValue};

use serde::Serialize;

/// A successfully interpreted query: ordered rows plus a one-line
/// natural-language summary. Ephemeral; nothing here is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// Name of the rule that produced this result.
    pub pattern: &'static str,
    pub table: ResultTable,
    pub summary: String,
}

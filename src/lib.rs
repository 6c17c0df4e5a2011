//! GraphOps Playground
//!
//! A graph-flavored query and inference playground: a deterministic,
//! rule-based natural-language query interpreter over an in-memory,
//! seed-generated mock dataset, plus a display-only declarative graph
//! schema and an LLM insight boundary.
//!
//! # Architecture
//!
//! - `dataset`: seed-reproducible relational mock tables (customers,
//!   orders, products, categories) with referential consistency by
//!   construction.
//! - `query`: normalization, an ordered rule table (first match wins),
//!   and canned result builders producing tabular rows plus a one-line
//!   summary. Unrecognized input is a normal `Unmatched` outcome.
//! - `schema`: YAML node/edge schema used for display and prompt
//!   context only; the interpreter never consumes it.
//! - `insight`: prompt templates over a narrow `TextGenerator` trait
//!   with a reqwest-backed client for hosted/local LLMs. Strictly
//!   opaque pass-through; interpreter correctness never depends on it.
//!
//! # Example
//!
//! ```rust
//! use graphops::dataset::{DatasetSizes, MockDataset};
//! use graphops::query::{interpret, Interpretation};
//!
//! let dataset = MockDataset::generate(42, &DatasetSizes::default());
//! match interpret("FIND Customers who ordered more than 2 products", &dataset) {
//!     Interpretation::Matched(result) => println!("{}", result.summary),
//!     Interpretation::Unmatched(u) => println!("no match for {:?}", u.original),
//! }
//! ```

#![warn(clippy::all)]

pub mod dataset;
pub mod insight;
pub mod query;
pub mod schema;

// Re-export main types for convenience
pub use dataset::{Category, Customer, DatasetSizes, MockDataset, Order, Product};

pub use query::{
    interpret, normalize, templates, Interpretation, QueryResult, ResultTable, Row, ScalarValue,
    UnmatchedQuery,
};

pub use schema::{GraphSchema, PropertyDecl, SchemaEdge, SchemaError, SchemaResult};

pub use insight::{
    client::LlmClient, InsightContext, InsightEngine, InsightError, InsightResult, LlmConfig,
    LlmProvider, TextGenerator,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

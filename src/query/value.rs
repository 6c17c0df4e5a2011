//! Scalar values and tabular results
//!
//! Query results flow out of the builders as ordered rows of named
//! scalars. Column order is declaration order, which keeps rendered
//! output stable across runs.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value in a result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    String(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Null,
}

impl ScalarValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ScalarValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ScalarValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            ScalarValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::String(s) => write!(f, "{}", s),
            ScalarValue::Integer(i) => write!(f, "{}", i),
            ScalarValue::Float(fl) => write!(f, "{:.2}", fl),
            ScalarValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            ScalarValue::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::String(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::String(s)
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        ScalarValue::Integer(i)
    }
}

impl From<usize> for ScalarValue {
    fn from(i: usize) -> Self {
        ScalarValue::Integer(i as i64)
    }
}

impl From<u32> for ScalarValue {
    fn from(i: u32) -> Self {
        ScalarValue::Integer(i64::from(i))
    }
}

impl From<f64> for ScalarValue {
    fn from(f: f64) -> Self {
        ScalarValue::Float(f)
    }
}

impl From<NaiveDate> for ScalarValue {
    fn from(d: NaiveDate) -> Self {
        ScalarValue::Date(d)
    }
}

/// One result row: column name to scalar, in column order.
pub type Row = IndexMap<String, ScalarValue>;

/// An ordered tabular result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl ResultTable {
    /// Create an empty table with the given column headers.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, row: Row) {
        debug_assert!(
            row.keys().eq(self.columns.iter()),
            "row columns must match table columns"
        );
        self.rows.push(row);
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Value of a named column in a given row, `Null` when absent.
    pub fn value(&self, row: usize, column: &str) -> ScalarValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column).cloned())
            .unwrap_or(ScalarValue::Null)
    }

    /// Render as an aligned plain-text table, suitable for logs and for
    /// embedding query results into LLM prompts.
    pub fn to_text(&self) -> String {
        if self.columns.is_empty() {
            return String::from("(no columns)");
        }

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.len()).collect();
        let mut cells: Vec<Vec<String>> = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let rendered: Vec<String> = self
                .columns
                .iter()
                .map(|c| row.get(c).map(|v| v.to_string()).unwrap_or_default())
                .collect();
            for (i, cell) in rendered.iter().enumerate() {
                widths[i] = widths[i].max(cell.len());
            }
            cells.push(rendered);
        }

        let mut out = String::new();
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            out.push_str(&format!("{:<width$}", col, width = widths[i]));
        }
        out.push('\n');
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    out.push_str("  ");
                }
                out.push_str(&format!("{:<width$}", cell, width = widths[i]));
            }
            out.push('\n');
        }
        if self.rows.is_empty() {
            out.push_str("(0 rows)\n");
        }
        out
    }
}

/// Build a row from `(column, value)` pairs.
#[macro_export]
macro_rules! row {
    ($($col:expr => $val:expr),* $(,)?) => {{
        let mut r = $crate::query::Row::new();
        $(r.insert($col.to_string(), $crate::query::ScalarValue::from($val));)*
        r
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(ScalarValue::from("x").as_str(), Some("x"));
        assert_eq!(ScalarValue::from(3i64).as_integer(), Some(3));
        assert_eq!(ScalarValue::from(2.5).as_float(), Some(2.5));
        assert!(ScalarValue::Null.is_null());
        assert_eq!(ScalarValue::from(3i64).as_str(), None);
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(ScalarValue::from(19.5).to_string(), "19.50");
        assert_eq!(ScalarValue::from("abc").to_string(), "abc");
        let d = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(ScalarValue::from(d).to_string(), "2024-06-01");
    }

    #[test]
    fn test_table_push_and_value() {
        let mut table = ResultTable::new(["Customer", "Total"]);
        table.push(row!["Customer" => "Alice Chen", "Total" => 120.0]);
        table.push(row!["Customer" => "Bob Diaz", "Total" => 80.5]);

        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert_eq!(table.value(0, "Customer").as_str(), Some("Alice Chen"));
        assert_eq!(table.value(1, "Total").as_float(), Some(80.5));
        assert!(table.value(5, "Total").is_null());
    }

    #[test]
    fn test_to_text_alignment() {
        let mut table = ResultTable::new(["Name", "N"]);
        table.push(row!["Name" => "long name here", "N" => 1i64]);
        let text = table.to_text();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        let row = lines.next().unwrap();
        assert!(header.starts_with("Name"));
        // "Name" is padded out to the widest cell in its column
        assert!(header.len() > "Name  N".len());
        assert!(row.contains("long name here"));
    }

    #[test]
    fn test_to_text_empty() {
        let table = ResultTable::new(["A"]);
        assert!(table.to_text().contains("(0 rows)"));
    }
}

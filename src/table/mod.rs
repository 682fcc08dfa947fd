// src/table/mod.rs
//! Tabular normalization — turning page records into ordered rows.
//!
//! This module is pure data transformation: no I/O, no network. Pages
//! come in as JSON records and leave as row batches with a stable,
//! first-seen-ordered column set.

mod filter;
mod flatten;

pub use filter::{FilterReport, IdentifierFilter};
pub use flatten::{flatten_record, flatten_records};

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

/// One flattened record: column name to scalar JSON value.
pub type Row = IndexMap<String, Value>;

/// An ordered sequence of rows with the union of their columns.
///
/// Used both for a single page's batch and for the accumulated result.
/// Appending a batch moves its rows over without re-copying rows already
/// held, so the accumulated table grows linearly with page count.
#[derive(Debug, Clone, Default)]
pub struct RowTable {
    columns: IndexSet<String>,
    rows: Vec<Row>,
}

impl RowTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one row, extending the column union in first-seen order.
    pub fn push_row(&mut self, row: Row) {
        for key in row.keys() {
            if !self.columns.contains(key) {
                self.columns.insert(key.clone());
            }
        }
        self.rows.push(row);
    }

    /// Moves all rows of `batch` onto the end of this table.
    pub fn extend(&mut self, batch: RowTable) {
        for column in batch.columns {
            self.columns.insert(column);
        }
        self.rows.extend(batch.rows);
    }

    /// Column names in first-seen order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Whether a column is present in the union.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(rows, columns)` shape, for progress reporting.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// Keeps only rows satisfying the predicate, preserving order.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn columns_union_in_first_seen_order() {
        let mut table = RowTable::new();
        table.push_row(row(&[("a", json!(1)), ("b", json!(2))]));
        table.push_row(row(&[("b", json!(3)), ("c", json!(4))]));

        assert_eq!(table.columns().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(table.shape(), (2, 3));
    }

    #[test]
    fn extend_appends_rows_in_order() {
        let mut first = RowTable::new();
        first.push_row(row(&[("id", json!("A"))]));

        let mut second = RowTable::new();
        second.push_row(row(&[("id", json!("B"))]));
        second.push_row(row(&[("id", json!("C")), ("extra", json!(true))]));

        first.extend(second);

        let ids: Vec<_> = first
            .rows()
            .map(|r| r.get("id").unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert!(first.has_column("extra"));
    }
}

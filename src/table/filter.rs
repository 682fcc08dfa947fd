// src/table/filter.rs
//! Allow-list filtering of rows by compound identifier.

use super::RowTable;
use crate::constants::IDENTIFIER_COLUMN;
use crate::error::AppError;
use serde_json::Value;
use std::collections::HashSet;

/// Restricts a batch to rows whose identifier column value is a member
/// of the allow-set.
///
/// A batch that carries the identifier column but keeps zero rows is a
/// normal empty result, not an error; the caller reports the counts.
#[derive(Debug, Clone)]
pub struct IdentifierFilter {
    column: String,
    allowed: HashSet<String>,
}

/// Per-page counts of what the filter saw and kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub total: usize,
    pub retained: usize,
}

impl IdentifierFilter {
    /// Creates a filter over an arbitrary column.
    pub fn new(column: impl Into<String>, ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            column: column.into(),
            allowed: ids.into_iter().collect(),
        }
    }

    /// Creates a filter over the ChEMBL molecule identifier column.
    pub fn for_molecules(ids: impl IntoIterator<Item = String>) -> Self {
        Self::new(IDENTIFIER_COLUMN, ids)
    }

    /// The column this filter matches against.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Number of identifiers in the allow-set.
    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Retains allow-listed rows, preserving their order.
    ///
    /// Fails with a schema error when a non-empty batch lacks the
    /// identifier column entirely; an individual row without a string
    /// value in that column is dropped like any non-member.
    pub fn apply(&self, mut batch: RowTable) -> Result<(RowTable, FilterReport), AppError> {
        let total = batch.row_count();
        if total == 0 {
            return Ok((batch, FilterReport::default()));
        }

        if !batch.has_column(&self.column) {
            return Err(AppError::Schema {
                column: self.column.clone(),
            });
        }

        batch.retain_rows(|row| match row.get(&self.column) {
            Some(Value::String(id)) => self.allowed.contains(id),
            _ => false,
        });

        let report = FilterReport {
            total,
            retained: batch.row_count(),
        };
        Ok((batch, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::flatten_records;
    use serde_json::json;

    fn batch_with_ids(ids: &[&str]) -> RowTable {
        let records: Vec<_> = ids
            .iter()
            .map(|id| json!({"molecule_chembl_id": id, "standard_value": 1}))
            .collect();
        flatten_records(&records)
    }

    #[test]
    fn keeps_only_members_in_order() {
        let filter =
            IdentifierFilter::for_molecules(["A".to_string(), "C".to_string()]);
        let (kept, report) = filter.apply(batch_with_ids(&["A", "B", "C", "D"])).unwrap();

        let ids: Vec<_> = kept
            .rows()
            .map(|r| r.get("molecule_chembl_id").unwrap().as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert_eq!(report, FilterReport { total: 4, retained: 2 });
    }

    #[test]
    fn missing_identifier_column_is_a_schema_error() {
        let filter = IdentifierFilter::for_molecules(["A".to_string()]);
        let batch = flatten_records(&[json!({"assay_chembl_id": "X"})]);

        match filter.apply(batch) {
            Err(AppError::Schema { column }) => assert_eq!(column, "molecule_chembl_id"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn empty_batch_passes_through() {
        let filter = IdentifierFilter::for_molecules(["A".to_string()]);
        let (kept, report) = filter.apply(RowTable::new()).unwrap();
        assert!(kept.is_empty());
        assert_eq!(report, FilterReport::default());
    }

    #[test]
    fn all_rows_filtered_out_is_not_an_error() {
        let filter = IdentifierFilter::for_molecules(["Z".to_string()]);
        let (kept, report) = filter.apply(batch_with_ids(&["A", "B"])).unwrap();
        assert!(kept.is_empty());
        assert_eq!(report, FilterReport { total: 2, retained: 0 });
    }

    #[test]
    fn row_without_string_id_is_dropped() {
        let filter = IdentifierFilter::for_molecules(["A".to_string()]);
        let batch = flatten_records(&[
            json!({"molecule_chembl_id": "A"}),
            json!({"molecule_chembl_id": null}),
        ]);

        let (kept, report) = filter.apply(batch).unwrap();
        assert_eq!(kept.row_count(), 1);
        assert_eq!(report, FilterReport { total: 2, retained: 1 });
    }
}

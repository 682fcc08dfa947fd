// src/table/flatten.rs
//! Dotted-path flattening of nested JSON records.
//!
//! `{"molecule_properties": {"alogp": 3.1}}` becomes the column
//! `molecule_properties.alogp`; array elements get numeric segments
//! (`activity_properties.0.type`). Scalars pass through unchanged and
//! empty composites are kept whole so they still render in output.

use super::{Row, RowTable};
use crate::constants::FLATTEN_SEPARATOR;
use serde_json::Value;

/// Flattens a list of JSON records into a row batch.
pub fn flatten_records(records: &[Value]) -> RowTable {
    let mut batch = RowTable::new();
    for record in records {
        batch.push_row(flatten_record(record));
    }
    batch
}

/// Flattens one JSON record into a single row.
///
/// Non-object records (a bare scalar in the record list) land in a
/// single `value` column rather than failing the page.
pub fn flatten_record(record: &Value) -> Row {
    let mut row = Row::new();
    flatten_into(&mut row, String::new(), record);
    row
}

fn flatten_into(out: &mut Row, prefix: String, value: &Value) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_into(out, join(&prefix, key), child);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(out, join(&prefix, &index.to_string()), child);
            }
        }
        // Scalars, nulls, and empty composites become leaf cells.
        other => {
            let column = if prefix.is_empty() {
                "value".to_string()
            } else {
                prefix
            };
            out.insert(column, other.clone());
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", prefix, FLATTEN_SEPARATOR, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_record_passes_through() {
        let row = flatten_record(&json!({
            "molecule_chembl_id": "CHEMBL25",
            "standard_value": 120.5,
            "active": true,
            "comment": null
        }));

        assert_eq!(row.get("molecule_chembl_id").unwrap(), "CHEMBL25");
        assert_eq!(row.get("standard_value").unwrap(), &json!(120.5));
        assert_eq!(row.get("active").unwrap(), &json!(true));
        assert_eq!(row.get("comment").unwrap(), &Value::Null);
    }

    #[test]
    fn nested_objects_get_dotted_columns() {
        let row = flatten_record(&json!({
            "molecule_chembl_id": "CHEMBL25",
            "molecule_properties": {"alogp": 3.1, "full_mwt": 180.16}
        }));

        assert_eq!(row.get("molecule_properties.alogp").unwrap(), &json!(3.1));
        assert_eq!(row.get("molecule_properties.full_mwt").unwrap(), &json!(180.16));
        assert!(!row.contains_key("molecule_properties"));
    }

    #[test]
    fn arrays_get_indexed_segments() {
        let row = flatten_record(&json!({
            "synonyms": ["aspirin", "ASA"],
            "activity_properties": [{"type": "IC50"}]
        }));

        assert_eq!(row.get("synonyms.0").unwrap(), "aspirin");
        assert_eq!(row.get("synonyms.1").unwrap(), "ASA");
        assert_eq!(row.get("activity_properties.0.type").unwrap(), "IC50");
    }

    #[test]
    fn empty_composites_survive_as_cells() {
        let row = flatten_record(&json!({"tags": [], "meta": {}}));

        assert_eq!(row.get("tags").unwrap(), &json!([]));
        assert_eq!(row.get("meta").unwrap(), &json!({}));
    }

    #[test]
    fn scalar_record_lands_in_value_column() {
        let row = flatten_record(&json!("CHEMBL25"));
        assert_eq!(row.get("value").unwrap(), "CHEMBL25");
    }

    #[test]
    fn batch_preserves_record_order() {
        let batch = flatten_records(&[
            json!({"id": "A"}),
            json!({"id": "B"}),
            json!({"id": "C"}),
        ]);

        let ids: Vec<_> = batch
            .rows()
            .map(|r| r.get("id").unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }
}

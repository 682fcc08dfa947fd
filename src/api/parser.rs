// src/api/parser.rs
//! Parsing of one page body into records and pagination metadata.
//!
//! Splits cleanly on HTTP status first, then decodes JSON, reads the
//! `page_meta` envelope, and locates the record list at the configured
//! record path. Every malformation is a fatal fetch error.

use super::client::ApiResponse;
use super::types::PageDocument;
use crate::constants::{PAGE_META_FIELD, PAGE_META_NEXT_FIELD};
use crate::error::{AppError, FetchError};
use crate::types::RecordPath;
use serde_json::Value;

/// Parses a raw page response into records plus the next-page link.
pub fn parse_page_document(
    response: ApiResponse<String>,
    record_path: &RecordPath,
) -> Result<PageDocument, AppError> {
    if !response.status.is_success() {
        return Err(FetchError::HttpStatus {
            status: response.status,
            url: response.url,
        }
        .into());
    }

    let document: Value = serde_json::from_str(&response.data).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", response.url, e);
        FetchError::malformed(&response.url, e.to_string(), &response.data)
    })?;

    let next = parse_next_link(&document, &response.url)?;
    let records = locate_records(&document, record_path, &response)?;

    Ok(PageDocument { records, next })
}

/// Reads `page_meta.next` from the document.
///
/// An absent envelope or a null/absent `next` means the terminal page;
/// an envelope of the wrong shape is a malformed response.
fn parse_next_link(document: &Value, url: &str) -> Result<Option<String>, FetchError> {
    match document.get(PAGE_META_FIELD) {
        None => Ok(None),
        Some(Value::Object(meta)) => match meta.get(PAGE_META_NEXT_FIELD) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(next)) => Ok(Some(next.clone())),
            Some(other) => Err(FetchError::MalformedPageMeta {
                url: url.to_string(),
                message: format!(
                    "'{}' must be a string or null, got: {}",
                    PAGE_META_NEXT_FIELD, other
                ),
            }),
        },
        Some(other) => Err(FetchError::MalformedPageMeta {
            url: url.to_string(),
            message: format!("'{}' must be an object, got: {}", PAGE_META_FIELD, other),
        }),
    }
}

/// Descends the record path and returns the record list found there.
///
/// An array yields its elements; a single object counts as one record
/// (mirrors normalizing a whole document when the path is empty).
fn locate_records(
    document: &Value,
    record_path: &RecordPath,
    response: &ApiResponse<String>,
) -> Result<Vec<Value>, FetchError> {
    let mut cursor = document;
    for segment in record_path.segments() {
        cursor = cursor
            .get(segment)
            .ok_or_else(|| FetchError::RecordPathMissing {
                path: record_path.to_string(),
                url: response.url.clone(),
            })?;
    }

    match cursor {
        Value::Array(items) => Ok(items.clone()),
        Value::Object(_) => Ok(vec![cursor.clone()]),
        _ => Err(FetchError::malformed(
            &response.url,
            format!(
                "record path '{}' does not point at a record list",
                record_path
            ),
            &response.data,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn ok_response(body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status: StatusCode::OK,
            url: "https://www.ebi.ac.uk/chembl/api/data/activity.json".to_string(),
        }
    }

    #[test]
    fn parses_records_and_next_link() {
        let body = r#"{
            "page_meta": {"limit": 2, "next": "/chembl/api/data/activity.json?offset=2"},
            "activities": [{"molecule_chembl_id": "CHEMBL25"}, {"molecule_chembl_id": "CHEMBL192"}]
        }"#;
        let path = RecordPath::parse("activities").unwrap();

        let page = parse_page_document(ok_response(body), &path).unwrap();
        assert_eq!(page.records.len(), 2);
        assert_eq!(
            page.next.as_deref(),
            Some("/chembl/api/data/activity.json?offset=2")
        );
    }

    #[test]
    fn null_next_means_terminal_page() {
        let body = r#"{"page_meta": {"next": null}, "activities": []}"#;
        let path = RecordPath::parse("activities").unwrap();

        let page = parse_page_document(ok_response(body), &path).unwrap();
        assert!(page.next.is_none());
        assert!(page.records.is_empty());
    }

    #[test]
    fn absent_page_meta_means_terminal_page() {
        let body = r#"[{"molecule_chembl_id": "CHEMBL25"}]"#;
        let page = parse_page_document(ok_response(body), &RecordPath::root()).unwrap();
        assert!(page.next.is_none());
        assert_eq!(page.records.len(), 1);
    }

    #[test]
    fn wrong_shaped_page_meta_is_malformed() {
        let body = r#"{"page_meta": "nope", "activities": []}"#;
        let path = RecordPath::parse("activities").unwrap();

        match parse_page_document(ok_response(body), &path) {
            Err(AppError::Fetch(FetchError::MalformedPageMeta { .. })) => {}
            other => panic!("expected malformed page_meta, got {other:?}"),
        }
    }

    #[test]
    fn non_string_next_is_malformed() {
        let body = r#"{"page_meta": {"next": 7}, "activities": []}"#;
        let path = RecordPath::parse("activities").unwrap();
        assert!(matches!(
            parse_page_document(ok_response(body), &path),
            Err(AppError::Fetch(FetchError::MalformedPageMeta { .. }))
        ));
    }

    #[test]
    fn invalid_json_is_a_fetch_error() {
        match parse_page_document(ok_response("<html>busy</html>"), &RecordPath::root()) {
            Err(AppError::Fetch(FetchError::MalformedResponse { .. })) => {}
            other => panic!("expected malformed response, got {other:?}"),
        }
    }

    #[test]
    fn missing_record_path_is_a_fetch_error() {
        let body = r#"{"page_meta": {"next": null}, "molecules": []}"#;
        let path = RecordPath::parse("activities").unwrap();

        match parse_page_document(ok_response(body), &path) {
            Err(AppError::Fetch(FetchError::RecordPathMissing { path, .. })) => {
                assert_eq!(path, "activities");
            }
            other => panic!("expected missing record path, got {other:?}"),
        }
    }

    #[test]
    fn scalar_at_record_path_is_malformed() {
        let body = r#"{"page_meta": {"next": null}, "activities": 3}"#;
        let path = RecordPath::parse("activities").unwrap();
        assert!(matches!(
            parse_page_document(ok_response(body), &path),
            Err(AppError::Fetch(FetchError::MalformedResponse { .. }))
        ));
    }

    #[test]
    fn http_error_status_is_fatal() {
        let response = ApiResponse {
            data: String::new(),
            status: StatusCode::BAD_GATEWAY,
            url: "https://www.ebi.ac.uk/x".to_string(),
        };
        assert!(matches!(
            parse_page_document(response, &RecordPath::root()),
            Err(AppError::Fetch(FetchError::HttpStatus { .. }))
        ));
    }
}

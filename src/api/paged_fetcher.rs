// src/api/paged_fetcher.rs
//! The pagination driver: follows `page_meta.next` until exhausted.
//!
//! Strictly sequential — the next URL is only known once the current
//! body has been parsed, so there is never more than one request in
//! flight. Any failure is fatal; rows already flushed to the sink stay
//! where they are.

use super::parser::parse_page_document;
use super::types::{FetchOutcome, FetchSummary};
use super::PageSource;
use crate::error::{AppError, FetchError};
use crate::output::RowSink;
use crate::table::{flatten_records, IdentifierFilter, RowTable};
use crate::types::{chembl_origin, RecordPath, StartUrl};
use url::Url;

/// Drives a multi-page fetch over a `PageSource`.
pub struct PagedFetcher<S> {
    source: S,
    origin: Url,
    record_path: RecordPath,
    filter: Option<IdentifierFilter>,
}

impl<S: PageSource> PagedFetcher<S> {
    /// Creates a fetcher reading records at `record_path` on every page.
    pub fn new(source: S, record_path: RecordPath) -> Self {
        Self {
            source,
            origin: chembl_origin().clone(),
            record_path,
            filter: None,
        }
    }

    /// Restricts fetched rows to identifier-filter members.
    pub fn with_filter(mut self, filter: IdentifierFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Fetches every page starting at `start`, returning the accumulated
    /// table and summary counters.
    ///
    /// When a sink is given, each page's retained rows are appended to it
    /// before the next page is requested, so progress survives a later
    /// failure.
    pub async fn fetch_all(
        &self,
        start: &StartUrl,
        mut sink: Option<&mut dyn RowSink>,
    ) -> Result<FetchOutcome, AppError> {
        let mut table = RowTable::new();
        let mut summary = FetchSummary::default();
        let mut url = start.as_url().clone();

        log::info!("Starting paged fetch at {}", url);

        loop {
            log::info!("GET {}", url);
            let response = self.source.fetch_page(&url).await?;
            let page = parse_page_document(response, &self.record_path)?;

            let mut batch = flatten_records(&page.records);
            summary.rows_seen += batch.row_count();

            if let Some(filter) = &self.filter {
                let (kept, report) = filter.apply(batch)?;
                log::info!(
                    "Identifier filter kept {}/{} rows on this page",
                    report.retained,
                    report.total
                );
                batch = kept;
            }
            summary.rows_retained += batch.row_count();

            if let Some(sink) = sink.as_mut() {
                let written = sink.append_batch(&batch)?;
                log::debug!("flushed {} rows to sink", written);
            }

            summary.pages_fetched += 1;
            table.extend(batch);
            log::debug!("accumulated table shape: {:?}", table.shape());

            match page.next {
                Some(next) => {
                    url = self.resolve_next(&next)?;
                    log::debug!("Will use this url next: {}", url);
                }
                None => break,
            }
        }

        log::info!(
            "Fetched {} pages, {} rows retained of {} seen",
            summary.pages_fetched,
            summary.rows_retained,
            summary.rows_seen
        );

        Ok(FetchOutcome { table, summary })
    }

    /// Joins a `page_meta.next` relative path with the API origin.
    fn resolve_next(&self, next: &str) -> Result<Url, FetchError> {
        self.origin
            .join(next)
            .map_err(|e| FetchError::InvalidNextUrl {
                next: next.to_string(),
                message: e.to_string(),
            })
    }
}

// src/lib.rs
//! chembl2csv library — downloads paginated ChEMBL data into flat tables.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `FetchError`, `ValidationError`
//! - **Configuration** — `PipelineConfig`, `CommandLineInput`
//! - **Domain types** — `StartUrl`, `RecordPath`
//! - **API client** — `PagedFetcher`, `PageSource`, `ChemblHttpClient`, parser
//! - **Tabular form** — `RowTable`, flattening, `IdentifierFilter`
//! - **Output** — `CsvSink`, `RowSink`, overwrite confirmation

// Internal modules — must match what's in main.rs
mod api;
mod config;
mod constants;
mod error;
mod output;
mod table;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, FetchError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, PipelineConfig};

// --- Domain Types ---
pub use crate::types::{chembl_origin, RecordPath, StartUrl};

// --- API Client ---
pub use crate::api::{
    extract_response_text, parse_page_document, ApiResponse, ChemblHttpClient, FetchOutcome,
    FetchSummary, PageDocument, PageSource, PagedFetcher,
};

// --- Tabular Form ---
pub use crate::table::{
    flatten_record, flatten_records, FilterReport, IdentifierFilter, Row, RowTable,
};

// --- Output ---
pub use crate::output::{AssumeYes, CsvSink, OverwriteConfirm, RowSink, TerminalConfirm};

// --- Constants ---
pub use crate::constants::{CHEMBL_ORIGIN, IDENTIFIER_COLUMN};

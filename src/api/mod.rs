// src/api/mod.rs
//! ChEMBL API interaction — the ability to retrieve paginated record pages.
//!
//! This module keeps a clear separation between I/O (the HTTP client),
//! parsing (body to `PageDocument`), and the pagination driver. Business
//! logic depends on the `PageSource` trait, never on HTTP details.

pub mod client;
mod paged_fetcher;
pub mod parser;
mod types;

use crate::error::AppError;
use url::Url;

/// The ability to retrieve one page body by URL.
///
/// The pagination driver only sees this trait, so tests drive it with
/// scripted in-memory pages instead of a live endpoint.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> Result<client::ApiResponse<String>, AppError>;
}

// Re-export the public interface
pub use client::{extract_response_text, ApiResponse, ChemblHttpClient};
pub use paged_fetcher::PagedFetcher;
pub use parser::parse_page_document;
pub use types::{FetchOutcome, FetchSummary, PageDocument};

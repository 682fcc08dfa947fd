// src/api/client.rs
//! Pure HTTP client wrapper for the ChEMBL web services.
//!
//! A thin wrapper around reqwest for issuing GET requests. It handles
//! headers, timeouts, and response extraction without parsing or
//! business logic. TLS certificate validation is always on.

use super::PageSource;
use crate::error::AppError;
use reqwest::{header, Client, Response};
use std::time::Duration;
use url::Url;

/// A thin wrapper around reqwest Client for ChEMBL API requests.
#[derive(Clone)]
pub struct ChemblHttpClient {
    client: Client,
}

impl ChemblHttpClient {
    /// Creates a new HTTP client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Creates the default headers for ChEMBL API requests.
    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Makes a GET request to the given absolute URL.
    pub async fn get(&self, url: &Url) -> Result<Response, AppError> {
        log::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        Ok(response)
    }
}

#[async_trait::async_trait]
impl PageSource for ChemblHttpClient {
    async fn fetch_page(&self, url: &Url) -> Result<ApiResponse<String>, AppError> {
        let response = self.get(url).await?;
        extract_response_text(response).await
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

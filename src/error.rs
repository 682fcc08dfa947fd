// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Every failure here is fatal by design: a fetch that breaks mid-way
//! terminates the run, leaving whatever was already flushed to disk.

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use std::path::PathBuf;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Schema error: identifier column '{column}' not present in fetched records")]
    Schema { column: String },

    #[error("Failed to persist rows to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Aborted: declined to overwrite {}", path.display())]
    AbortedByUser { path: PathBuf },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Wraps a write failure with the sink path it happened on.
    pub fn persist(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Persist {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

// Transport failures funnel through FetchError so the taxonomy stays
// two-level even when `?` is used directly on reqwest calls.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(FetchError::Transport(err))
    }
}

// Allow converting from anyhow::Error, preserving the message
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::MissingConfiguration(err.to_string())
    }
}

/// Transport-level failure while retrieving or decoding one page.
///
/// Everything the network or the server can do wrong lives here, so the
/// pagination loop has a single fatal error channel and no retry paths.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("malformed response from {url}: {message}\nBody: {body_preview}")]
    MalformedResponse {
        url: String,
        message: String,
        body_preview: String,
    },

    #[error("record path '{path}' not found in response from {url}")]
    RecordPathMissing { path: String, url: String },

    #[error("pagination metadata malformed in response from {url}: {message}")]
    MalformedPageMeta { url: String, message: String },

    #[error("could not resolve next page URL '{next}': {message}")]
    InvalidNextUrl { next: String, message: String },
}

impl FetchError {
    /// Builds a malformed-response error with a truncated body preview.
    ///
    /// ChEMBL error pages can be whole HTML documents; previewing keeps
    /// logs readable while still showing what came back.
    pub fn malformed(url: impl Into<String>, message: impl Into<String>, body: &str) -> Self {
        let preview = if body.len() > ERROR_BODY_PREVIEW_LENGTH {
            let cut = body
                .char_indices()
                .take_while(|(i, _)| *i < ERROR_BODY_PREVIEW_LENGTH)
                .last()
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(0);
            format!("{}...", &body[..cut])
        } else {
            body.to_string()
        };
        FetchError::MalformedResponse {
            url: url.into(),
            message: message.into(),
            body_preview: preview,
        }
    }
}

/// Result type alias for convenience
#[allow(dead_code)]
pub type Result<T, E = AppError> = std::result::Result<T, E>;

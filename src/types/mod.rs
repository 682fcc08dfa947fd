use thiserror::Error;

mod domain_types;

pub use domain_types::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid record path: {path} - {reason}")]
    InvalidRecordPath { path: String, reason: String },

    #[error("Invalid identifier list: {reason}")]
    InvalidIdentifierList { reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),
}

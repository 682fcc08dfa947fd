// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use crate::constants::{CHEMBL_ORIGIN, FLATTEN_SEPARATOR};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// The fixed origin all relative ChEMBL paths resolve against.
static ORIGIN: Lazy<Url> =
    Lazy::new(|| Url::parse(CHEMBL_ORIGIN).expect("ChEMBL origin constant must parse"));

/// Returns the parsed ChEMBL origin.
pub fn chembl_origin() -> &'static Url {
    &ORIGIN
}

/// Validated absolute URL for the first page of a fetch.
///
/// Accepts either an absolute http(s) URL or a relative path such as
/// `/chembl/api/data/activity.json?limit=1000&offset=1`, which is joined
/// with the ChEMBL origin. Anything else is rejected up front so the
/// pagination loop only ever sees well-formed URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartUrl(Url);

impl StartUrl {
    /// Create a validated starting URL from raw CLI input.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::EmptyField("starting URL"));
        }

        let url = if input.starts_with('/') {
            ORIGIN.join(input).map_err(|e| ValidationError::InvalidUrl {
                url: input.to_string(),
                reason: e.to_string(),
            })?
        } else {
            Url::parse(input).map_err(|e| ValidationError::InvalidUrl {
                url: input.to_string(),
                reason: e.to_string(),
            })?
        };

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ValidationError::InvalidUrl {
                url: input.to_string(),
                reason: "Only HTTP and HTTPS URLs are supported".to_string(),
            });
        }

        Ok(Self(url))
    }

    /// Get the underlying URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Get the URL as a string
    #[allow(dead_code)]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StartUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for StartUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StartUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        StartUrl::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Dot-separated path locating the record list inside a page document.
///
/// An empty path means the whole document is the record list, matching
/// endpoints that return a bare array.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordPath(Vec<String>);

impl RecordPath {
    /// Parse a record path like `activities` or `response.results`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::root());
        }

        let segments: Vec<String> = input
            .split(FLATTEN_SEPARATOR)
            .map(str::to_string)
            .collect();

        if segments.iter().any(String::is_empty) {
            return Err(ValidationError::InvalidRecordPath {
                path: input.to_string(),
                reason: "path segments must not be empty".to_string(),
            });
        }

        Ok(Self(segments))
    }

    /// The empty path: the whole document is the record list.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Whether this path points at the document root.
    #[allow(dead_code)]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over path segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for RecordPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0.join("."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_url_accepts_absolute() {
        let url = StartUrl::parse("https://www.ebi.ac.uk/chembl/api/data/activity.json").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.ebi.ac.uk/chembl/api/data/activity.json"
        );
    }

    #[test]
    fn start_url_joins_relative_paths_with_origin() {
        let url = StartUrl::parse("/chembl/api/data/activity.json?limit=1000&offset=1").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.ebi.ac.uk/chembl/api/data/activity.json?limit=1000&offset=1"
        );
    }

    #[test]
    fn start_url_rejects_other_schemes() {
        assert!(StartUrl::parse("ftp://example.org/data").is_err());
        assert!(StartUrl::parse("").is_err());
    }

    #[test]
    fn record_path_splits_on_dots() {
        let path = RecordPath::parse("response.activities").unwrap();
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["response", "activities"]);
    }

    #[test]
    fn record_path_empty_means_root() {
        assert!(RecordPath::parse("").unwrap().is_root());
        assert!(RecordPath::parse("  ").unwrap().is_root());
    }

    #[test]
    fn record_path_rejects_empty_segments() {
        assert!(RecordPath::parse("a..b").is_err());
    }
}

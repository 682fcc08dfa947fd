// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story
//! of how the system talks to ChEMBL and how it shapes its output.

// ---------------------------------------------------------------------------
// ChEMBL API boundaries
// ---------------------------------------------------------------------------

/// Origin of the ChEMBL web data services.
///
/// Pagination metadata carries relative paths; every `page_meta.next`
/// value is joined against this origin to form the next absolute URL.
pub const CHEMBL_ORIGIN: &str = "https://www.ebi.ac.uk";

/// JSON field carrying the pagination envelope on every response.
pub const PAGE_META_FIELD: &str = "page_meta";

/// Field inside the pagination envelope holding the next relative path.
pub const PAGE_META_NEXT_FIELD: &str = "next";

/// Per-request timeout in seconds.
///
/// ChEMBL pages of 1000 records normally arrive well within this; expiry
/// is reported as a transport failure and aborts the whole fetch.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Table shape
// ---------------------------------------------------------------------------

/// Column holding the compound identifier that the allow-list filter
/// matches against.
pub const IDENTIFIER_COLUMN: &str = "molecule_chembl_id";

/// Separator joining nested JSON keys into flattened column names
/// (`molecule_properties.alogp`, `activity_properties.0.type`).
pub const FLATTEN_SEPARATOR: char = '.';

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;

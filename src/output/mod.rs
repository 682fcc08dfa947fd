// src/output/mod.rs
//! Output handling — appending row batches to persistent storage.
//!
//! The only place where file I/O occurs, keeping the fetch and
//! normalization layers pure and testable.

mod confirm;
mod csv_sink;

use crate::error::AppError;
use crate::table::RowTable;

/// An append-only destination for row batches.
///
/// The first appended batch establishes the destination (header, file
/// creation); later batches only ever add rows.
pub trait RowSink {
    /// Appends one batch, returning the number of rows written.
    fn append_batch(&mut self, batch: &RowTable) -> Result<usize, AppError>;
}

// Re-export the public interface
pub use confirm::{AssumeYes, OverwriteConfirm, TerminalConfirm};
pub use csv_sink::CsvSink;

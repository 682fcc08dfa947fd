// src/output/csv_sink.rs
//! CSV destination for row batches, appended page by page.
//!
//! The header is written exactly once, from the first batch's columns;
//! every later batch is projected onto that layout and appended. A
//! leading index column numbers rows across the whole run, matching the
//! in-memory table's iteration order.

use super::{OverwriteConfirm, RowSink};
use crate::error::AppError;
use crate::table::RowTable;
use serde_json::Value;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Writes row batches to one CSV file.
#[derive(Debug)]
pub struct CsvSink {
    path: PathBuf,
    /// Column layout locked at the first flushed batch.
    header: Option<Vec<String>>,
    /// Running row index across batches.
    next_index: u64,
    /// Columns already reported as absent from the header.
    dropped_columns: HashSet<String>,
}

impl CsvSink {
    /// Prepares a sink for `path`, running the overwrite gate if the
    /// file already exists.
    ///
    /// The file itself is not touched until the first batch is flushed,
    /// so an approved overwrite followed by an early fetch failure
    /// leaves the pre-existing file intact.
    pub fn create(
        path: impl Into<PathBuf>,
        confirm: &dyn OverwriteConfirm,
    ) -> Result<Self, AppError> {
        let path = path.into();

        if path.exists() && !confirm.confirm_overwrite(&path)? {
            log::warn!("Overwrite of {} declined", path.display());
            return Err(AppError::AbortedByUser { path });
        }

        Ok(Self {
            path,
            header: None,
            next_index: 0,
            dropped_columns: HashSet::new(),
        })
    }

    /// The file this sink writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total rows flushed so far.
    pub fn rows_written(&self) -> u64 {
        self.next_index
    }

    /// First flush: creates the parent directory and the file, then
    /// writes header and rows.
    fn write_first_batch(&mut self, batch: &RowTable) -> Result<usize, AppError> {
        if batch.column_count() == 0 {
            log::debug!("empty batch before the header is known; nothing written");
            return Ok(0);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| AppError::persist(&self.path, e))?;
            }
        }

        let file = File::create(&self.path).map_err(|e| AppError::persist(&self.path, e))?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));

        let columns: Vec<String> = batch.columns().map(str::to_string).collect();

        // Leading index column carries an empty header cell.
        let mut header_record = Vec::with_capacity(columns.len() + 1);
        header_record.push(String::new());
        header_record.extend(columns.iter().cloned());
        writer
            .write_record(&header_record)
            .map_err(|e| AppError::persist(&self.path, e))?;

        let written = self.write_rows(&mut writer, batch, &columns)?;
        writer.flush().map_err(|e| AppError::persist(&self.path, e))?;

        log::info!(
            "Created {} with {} columns, {} rows",
            self.path.display(),
            columns.len(),
            written
        );
        self.header = Some(columns);
        Ok(written)
    }

    /// Later flushes: append rows only, no header.
    fn append_rows(&mut self, batch: &RowTable, columns: &[String]) -> Result<usize, AppError> {
        if batch.is_empty() {
            return Ok(0);
        }

        self.warn_on_unknown_columns(batch, columns);

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| AppError::persist(&self.path, e))?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));

        let written = self.write_rows(&mut writer, batch, columns)?;
        writer.flush().map_err(|e| AppError::persist(&self.path, e))?;

        log::debug!("Appended {} rows to {}", written, self.path.display());
        Ok(written)
    }

    fn write_rows<W: std::io::Write>(
        &mut self,
        writer: &mut csv::Writer<W>,
        batch: &RowTable,
        columns: &[String],
    ) -> Result<usize, AppError> {
        let mut written = 0;
        for row in batch.rows() {
            let mut record = Vec::with_capacity(columns.len() + 1);
            record.push(self.next_index.to_string());
            for column in columns {
                record.push(row.get(column).map(cell_text).unwrap_or_default());
            }
            writer
                .write_record(&record)
                .map_err(|e| AppError::persist(&self.path, e))?;
            self.next_index += 1;
            written += 1;
        }
        Ok(written)
    }

    /// Columns appearing after the header is locked cannot be written;
    /// report each once.
    fn warn_on_unknown_columns(&mut self, batch: &RowTable, columns: &[String]) {
        for column in batch.columns() {
            if !columns.iter().any(|c| c == column) && self.dropped_columns.insert(column.to_string())
            {
                log::warn!(
                    "Column '{}' appeared after the header was written; dropping it from {}",
                    column,
                    self.path.display()
                );
            }
        }
    }
}

impl RowSink for CsvSink {
    fn append_batch(&mut self, batch: &RowTable) -> Result<usize, AppError> {
        let columns = match &self.header {
            Some(columns) => columns.clone(),
            None => return self.write_first_batch(batch),
        };
        self.append_rows(batch, &columns)
    }
}

/// Renders one cell. Nulls become empty cells; residual composites
/// (empty arrays/objects kept whole by flattening) serialize compactly.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

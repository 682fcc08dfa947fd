// src/config.rs
use crate::constants::REQUEST_TIMEOUT_SECS;
use crate::error::AppError;
use crate::table::IdentifierFilter;
use crate::types::{RecordPath, StartUrl, ValidationError};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Starting URL, absolute or relative to the ChEMBL origin
    /// (e.g., "/chembl/api/data/activity.json?limit=1000&offset=1")
    pub starting_url: String,

    /// Path in each page document to the list of records (e.g., "activities");
    /// omit to treat the whole document as the record list
    #[arg(short = 'r', long)]
    pub record_path: Option<String>,

    /// Comma-separated molecule identifiers to retain (e.g., "CHEMBL25,CHEMBL192")
    #[arg(long)]
    pub filter_ids: Option<String>,

    /// File with one molecule identifier per line; merged with --filter-ids
    #[arg(long)]
    pub filter_file: Option<PathBuf>,

    /// CSV file the fetched rows are appended to, page by page
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file without prompting
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved pipeline configuration — validated and ready to drive a fetch.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub start_url: StartUrl,
    pub record_path: RecordPath,
    pub filter: Option<IdentifierFilter>,
    pub output_file: Option<PathBuf>,
    pub assume_yes: bool,
    pub verbose: bool,
    pub timeout: Duration,
}

impl PipelineConfig {
    /// Resolves a complete pipeline configuration from CLI input.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let start_url = StartUrl::parse(&cli.starting_url)?;

        let record_path = match cli.record_path.as_deref() {
            Some(path) => RecordPath::parse(path)?,
            None => RecordPath::root(),
        };

        let filter = resolve_filter(cli.filter_ids.as_deref(), cli.filter_file.as_deref())?;

        Ok(PipelineConfig {
            start_url,
            record_path,
            filter,
            output_file: cli.output,
            assume_yes: cli.yes,
            verbose: cli.verbose,
            timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}

/// Merges inline and file-sourced identifiers into one allow-list.
///
/// Returns `None` when neither source was named; naming a source that
/// yields zero identifiers is a configuration error rather than a
/// silently unfiltered fetch.
fn resolve_filter(
    inline: Option<&str>,
    file: Option<&Path>,
) -> Result<Option<IdentifierFilter>, AppError> {
    if inline.is_none() && file.is_none() {
        return Ok(None);
    }

    let mut ids: Vec<String> = Vec::new();

    if let Some(list) = inline {
        ids.extend(
            list.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from),
        );
    }

    if let Some(path) = file {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::MissingConfiguration(format!(
                "could not read filter file {}: {}",
                path.display(),
                e
            ))
        })?;
        ids.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from),
        );
    }

    if ids.is_empty() {
        return Err(ValidationError::InvalidIdentifierList {
            reason: "no identifiers provided".to_string(),
        }
        .into());
    }

    Ok(Some(IdentifierFilter::for_molecules(ids)))
}

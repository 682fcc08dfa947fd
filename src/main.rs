// src/main.rs

// Modules defined in the crate
mod api;
mod config;
mod constants;
mod error;
mod output;
mod table;
mod types;

// Specific imports
use crate::api::{ChemblHttpClient, FetchOutcome, PagedFetcher};
use crate::config::{CommandLineInput, PipelineConfig};
use crate::error::AppError;
use crate::output::{AssumeYes, CsvSink, OverwriteConfirm, RowSink, TerminalConfirm};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("chembl_fetcher.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Executes the fetch pipeline: gate the sink, walk the pages, report.
async fn execute_pipeline(config: &PipelineConfig) -> Result<(), AppError> {
    let client = ChemblHttpClient::new(config.timeout)?;

    let mut fetcher = PagedFetcher::new(client, config.record_path.clone());
    if let Some(filter) = &config.filter {
        log::info!(
            "Filtering on {} identifiers in column '{}'",
            filter.len(),
            filter.column()
        );
        fetcher = fetcher.with_filter(filter.clone());
    }

    // The overwrite gate runs here, before the first network request.
    let mut sink = match &config.output_file {
        Some(path) => {
            let confirm: Box<dyn OverwriteConfirm> = if config.assume_yes {
                Box::new(AssumeYes)
            } else {
                Box::new(TerminalConfirm)
            };
            Some(CsvSink::create(path.clone(), confirm.as_ref())?)
        }
        None => None,
    };

    let outcome = fetcher
        .fetch_all(
            &config.start_url,
            sink.as_mut().map(|s| s as &mut dyn RowSink),
        )
        .await?;

    report_completion(config, &outcome, sink.as_ref());
    Ok(())
}

/// Reports completion to the user with fetch stats and the sink path.
fn report_completion(config: &PipelineConfig, outcome: &FetchOutcome, sink: Option<&CsvSink>) {
    let (rows, columns) = outcome.table.shape();
    println!(
        "📄 Fetched {} page(s): {} rows × {} columns.",
        outcome.summary.pages_fetched, rows, columns
    );

    if config.filter.is_some() && outcome.summary.rows_dropped() > 0 {
        println!(
            "🔎 Identifier filter dropped {} of {} rows.",
            outcome.summary.rows_dropped(),
            outcome.summary.rows_seen
        );
    }

    if let Some(sink) = sink {
        println!(
            "✓ {} rows saved to {}",
            sink.rows_written(),
            sink.path().display()
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = PipelineConfig::resolve(cli)?;

    execute_pipeline(&config).await?;

    Ok(())
}

//! Output module for harvest results
//!
//! This module handles:
//! - Restoring discovery order over out-of-order completions
//! - Exporting quest records as CSV
//! - Summarizing a run

mod aggregator;
mod csv_sink;
mod report;
mod traits;

pub use aggregator::{FailedQuest, ResultAggregator};
pub use csv_sink::{CsvSink, CSV_HEADERS, DEFAULT_UNKNOWN_STEPS_MARKER};
pub use report::{print_report, HarvestReport};
pub use traits::{OutputError, OutputResult, RecordSink};

use crate::config::OutputConfig;
use crate::quest::QuestDetail;
use std::path::Path;

/// Writes `details` to the configured CSV file
///
/// Returns the number of rows written.
pub fn write_csv(config: &OutputConfig, details: &[QuestDetail]) -> OutputResult<usize> {
    let path = Path::new(&config.csv_path);
    let mut sink = CsvSink::create(path, &config.unknown_steps_marker)?;
    sink.write_all(details)?;

    tracing::info!(rows = sink.rows_written(), path = %path.display(), "CSV written");
    Ok(sink.rows_written())
}

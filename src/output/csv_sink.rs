//! CSV export of quest records

use crate::output::traits::{OutputError, OutputResult, RecordSink};
use crate::quest::QuestDetail;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Column headers of the exported file
pub const CSV_HEADERS: [&str; 4] = ["Region", "Quest Name", "Steps to Complete", "Rewards"];

/// Default marker written when a quest's step count is unknown
pub const DEFAULT_UNKNOWN_STEPS_MARKER: &str = "Unknown";

/// Writes quest records as CSV rows
///
/// The header row is written on creation. Rewards share one cell, one reward
/// per line.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    unknown_steps_marker: String,
    rows_written: usize,
}

impl CsvSink<File> {
    /// Creates (or truncates) the file at `path`
    pub fn create(path: &Path, unknown_steps_marker: &str) -> OutputResult<Self> {
        let file = File::create(path)?;
        Self::from_writer(file, unknown_steps_marker)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W, unknown_steps_marker: &str) -> OutputResult<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(CSV_HEADERS)?;
        Ok(Self {
            writer,
            unknown_steps_marker: unknown_steps_marker.to_string(),
            rows_written: 0,
        })
    }

    /// Number of data rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Write(e.to_string()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_detail(&mut self, detail: &QuestDetail) -> OutputResult<()> {
        let steps = detail
            .step_count
            .map_or_else(|| self.unknown_steps_marker.clone(), |count| count.to_string());

        self.writer.write_record([
            detail.region.as_str(),
            detail.name.as_str(),
            steps.as_str(),
            detail.rewards.join("\n").as_str(),
        ])?;
        self.rows_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

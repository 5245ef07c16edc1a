//! Output sink trait and errors

use crate::quest::QuestDetail;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination of the harvested quest records
pub trait RecordSink {
    /// Writes one record
    fn write_detail(&mut self, detail: &QuestDetail) -> OutputResult<()>;

    /// Flushes buffered records
    fn finish(&mut self) -> OutputResult<()>;

    /// Writes every record in order, then finishes
    fn write_all(&mut self, details: &[QuestDetail]) -> OutputResult<()> {
        for detail in details {
            self.write_detail(detail)?;
        }
        self.finish()
    }
}

//! Run Logger
//!
//! Append-only JSONL logging of iteration reports. Each run is tagged
//! with a fresh run id written as a header record, followed by one
//! report per line.

use serde_json::json;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use uuid::Uuid;

use crate::model::MODEL_NAME;
use crate::report::IterationReport;

/// Writes iteration reports to a JSONL file.
pub struct RunLogger {
    writer: Option<BufWriter<File>>,
    run_id: Uuid,
    report_count: u64,
}

impl RunLogger {
    /// Create a new run logger writing to the specified path.
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut logger = Self {
            writer: Some(BufWriter::new(file)),
            run_id: Uuid::new_v4(),
            report_count: 0,
        };
        logger.write_header()?;
        Ok(logger)
    }

    /// Create a logger that discards reports (for testing).
    pub fn null() -> Self {
        Self {
            writer: None,
            run_id: Uuid::new_v4(),
            report_count: 0,
        }
    }

    fn write_header(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            let header = json!({ "run_id": self.run_id, "model": MODEL_NAME });
            writeln!(writer, "{}", header)?;
        }
        Ok(())
    }

    /// Identifier of this run.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Reports logged so far.
    pub fn report_count(&self) -> u64 {
        self.report_count
    }

    /// Log a report to the file.
    pub fn log(&mut self, report: &IterationReport) -> std::io::Result<()> {
        self.report_count += 1;
        if let Some(ref mut writer) = self.writer {
            let line = serde_json::to_string(report)?;
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }

    /// Log multiple reports.
    pub fn log_batch(&mut self, reports: &[IterationReport]) -> std::io::Result<()> {
        for report in reports {
            self.log(report)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk.
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for RunLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("Warning: Failed to flush run logger: {}", e);
        }
    }
}

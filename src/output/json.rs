//! JSON file output
//!
//! Writes the record array with two-space indentation. Non-ASCII text is
//! written as-is.

use crate::extract::PageRecord;
use crate::output::traits::{OutputError, OutputHandler, OutputResult};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes records to a JSON file, creating parent directories as needed
#[derive(Debug, Clone)]
pub struct JsonOutput {
    path: PathBuf,
}

impl JsonOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_err(&self, source: std::io::Error) -> OutputError {
        OutputError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl OutputHandler for JsonOutput {
    fn write_records(&self, records: &[PageRecord]) -> OutputResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.write_err(e))?;
            }
        }

        let file = File::create(&self.path).map_err(|e| self.write_err(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.write_all(b"\n").map_err(|e| self.write_err(e))?;
        writer.flush().map_err(|e| self.write_err(e))?;

        tracing::info!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn destination(&self) -> &Path {
        &self.path
    }
}

/// Writes records as pretty JSON to `path`
pub fn write_json(path: &Path, records: &[PageRecord]) -> OutputResult<()> {
    JsonOutput::new(path).write_records(records)
}

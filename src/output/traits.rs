//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! run summary printed when a crawl completes.

use crate::extract::PageRecord;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One-line summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Number of records written
    pub count: usize,

    /// Where the records were written
    pub output_file: String,
}

impl RunSummary {
    pub fn new(count: usize, output_file: &Path) -> Self {
        Self {
            count,
            output_file: output_file.display().to_string(),
        }
    }

    /// Renders the summary as a single JSON line
    pub fn to_json(&self) -> OutputResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Trait for output handlers
///
/// An output handler receives the complete, ordered result list once the
/// crawl has stopped.
pub trait OutputHandler {
    /// Writes all records in completion order
    fn write_records(&self, records: &[PageRecord]) -> OutputResult<()>;

    /// Human-readable destination, used in logs and the run summary
    fn destination(&self) -> &Path;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_summary_json() {
        let summary = RunSummary::new(3, Path::new("data/output.json"));
        assert_eq!(
            summary.to_json().unwrap(),
            r#"{"count":3,"outputFile":"data/output.json"}"#
        );
    }
}

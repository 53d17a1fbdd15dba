//! JSON exporter for analysis reports.
//!
//! Writes an [`AnalysisReport`] verbatim as pretty-printed JSON. The report
//! is only borrowed, so a failed export leaves it untouched.

use qdrift_core::AnalysisReport;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors raised while exporting or reloading a report.
#[derive(Debug, Error)]
pub enum ExportError {
    /// File could not be created, written, or read
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Report could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ExportError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Encodes a report as pretty-printed JSON.
pub fn to_json_pretty(report: &AnalysisReport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes a report to a JSON file.
///
/// The report is encoded before the file is created, so an encoding
/// failure never leaves an empty file behind.
pub fn write_report(report: &AnalysisReport, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let json = to_json_pretty(report)?;
    let mut file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    file.write_all(json.as_bytes())
        .map_err(|e| ExportError::io(path, e))?;
    file.write_all(b"\n").map_err(|e| ExportError::io(path, e))?;
    Ok(())
}

/// Reads a report previously written by [`write_report`].
pub fn read_report(path: impl AsRef<Path>) -> Result<AnalysisReport, ExportError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
    Ok(serde_json::from_str(&json)?)
}

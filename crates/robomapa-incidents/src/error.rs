//! Error types for incident loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for incident operations.
pub type Result<T> = std::result::Result<T, IncidentError>;

/// Errors that can occur while loading a quarterly report
#[derive(Error, Debug)]
pub enum IncidentError {
    /// Quarter file does not exist
    #[error("Incident file not found: {0}")]
    MissingFile(PathBuf),

    /// File extension is not a supported format
    #[error("Unsupported incident file format: {0}")]
    UnsupportedFormat(String),

    /// Workbook has no worksheet
    #[error("Workbook has no worksheets: {0}")]
    EmptyWorkbook(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet decoding error
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// CSV decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

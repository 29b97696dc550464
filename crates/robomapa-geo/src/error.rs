//! Error types for zone loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur while loading zones
#[derive(Error, Debug)]
pub enum GeoError {
    /// Zone file does not exist
    #[error("Zone file not found: {0}")]
    MissingFile(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required column missing from the header
    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    /// Geometry text is not valid WKT
    #[error("Invalid WKT on row {row}: {message}")]
    Wkt {
        /// 1-based data row
        row: usize,
        /// Parser message
        message: String,
    },

    /// Geometry is not a polygon or multi-polygon
    #[error("Unsupported geometry on row {row}: {kind}")]
    UnsupportedGeometry {
        /// 1-based data row
        row: usize,
        /// Geometry kind found
        kind: &'static str,
    },

    /// Zone key is not a valid alias literal
    #[error("Invalid alias list on row {row}: {source}")]
    AliasLiteral {
        /// 1-based data row
        row: usize,
        /// Parse failure
        source: robomapa_domain::AliasError,
    },
}

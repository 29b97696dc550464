//! Error types for rendering

use thiserror::Error;

/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while building or serializing a map
#[derive(Error, Debug)]
pub enum RenderError {
    /// Reconciled zones do not line up with the geometry layer
    #[error("Zone mismatch: expected {expected}, found {found}")]
    ZoneMismatch {
        /// Key from the geometry layer
        expected: String,
        /// Key from the reconciled zones
        found: String,
    },

    /// Different number of zones and shapes
    #[error("Zone count mismatch: {shapes} shapes, {zones} zones")]
    ZoneCount {
        /// Shapes in the layer
        shapes: usize,
        /// Reconciled zones
        zones: usize,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

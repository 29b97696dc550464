//! Error types for the pipeline

use robomapa_geo::GeoError;
use robomapa_incidents::IncidentError;
use robomapa_render::RenderError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised while running the pipeline
#[derive(Error, Debug)]
pub enum EngineError {
    /// Zone layer could not be loaded
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// Quarter report could not be loaded
    #[error(transparent)]
    Incidents(#[from] IncidentError),

    /// Document could not be built or serialized
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Lookup override file could not be read
    #[error("Failed to read lookup file {path}: {source}")]
    LookupRead {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Lookup override file is not valid TOML
    #[error("Failed to parse lookup file {path}: {source}")]
    LookupParse {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },
}

impl EngineError {
    /// Whether the error means an input file is absent
    pub fn is_missing_file(&self) -> bool {
        matches!(
            self,
            EngineError::Geo(GeoError::MissingFile(_))
                | EngineError::Incidents(IncidentError::MissingFile(_))
        )
    }
}

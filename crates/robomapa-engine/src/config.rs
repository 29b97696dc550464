//! Data source configuration
//!
//! Shared by the CLI and the dashboard as the `[data]` table of their TOML
//! files.

use robomapa_incidents::{IncidentSource, DEFAULT_PATTERN};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Matching strategy selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Exact normalized lookup with reviewed overrides
    #[default]
    Lookup,
    /// Legacy substring matching
    Substring,
}

impl StrategyKind {
    /// Parse `lookup` / `exact` / `substring`
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "lookup" | "exact" => Some(StrategyKind::Lookup),
            "substring" => Some(StrategyKind::Substring),
            _ => None,
        }
    }
}

/// Where the input files live and how they are matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the zone CSV and quarterly reports
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Zone dataset file name, relative to `dir`
    #[serde(default = "default_zones_file")]
    pub zones_file: String,

    /// Quarterly report file name pattern containing `{quarter}`
    #[serde(default = "default_incident_pattern")]
    pub incident_pattern: String,

    /// Optional reviewed name overrides, relative to `dir`
    #[serde(default)]
    pub lookup_file: Option<PathBuf>,

    /// Matching strategy
    #[serde(default)]
    pub strategy: StrategyKind,
}

fn default_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_zones_file() -> String {
    "final-df-Leon.csv".to_string()
}

fn default_incident_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            zones_file: default_zones_file(),
            incident_pattern: default_incident_pattern(),
            lookup_file: None,
            strategy: StrategyKind::default(),
        }
    }
}

impl DataConfig {
    /// Config rooted at `dir` with default file names
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Full path of the zone dataset
    pub fn zones_path(&self) -> PathBuf {
        self.dir.join(&self.zones_file)
    }

    /// Full path of the lookup file, if configured
    pub fn lookup_path(&self) -> Option<PathBuf> {
        self.lookup_file.as_ref().map(|file| self.dir.join(file))
    }

    /// Quarterly report location
    pub fn incident_source(&self) -> IncidentSource {
        IncidentSource {
            dir: self.dir.clone(),
            pattern: self.incident_pattern.clone(),
        }
    }
}

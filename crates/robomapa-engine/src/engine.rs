//! Pipeline entry point

use crate::config::{DataConfig, StrategyKind};
use crate::error::{EngineError, Result};
use robomapa_domain::{reconcile, CrimeType, MatchStrategy, NameOverrides, Quarter, Reconciliation};
use robomapa_geo::{load_zones, ZoneLayer};
use robomapa_incidents::{load_quarter, IncidentTable};
use robomapa_render::{MapDocument, MapSettings};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Incidents of one quarter and the zones they reconciled into
#[derive(Debug, Clone)]
pub struct QuarterRun {
    /// Aggregated quarter report
    pub incidents: IncidentTable,

    /// Zones with totals plus the reconcile report
    pub reconciliation: Reconciliation,
}

/// Loaded zone layer plus the configuration needed to process quarters
#[derive(Debug, Clone)]
pub struct Engine {
    config: DataConfig,
    layer: Arc<ZoneLayer>,
    strategy: MatchStrategy,
}

impl Engine {
    /// Load the zone layer and lookup overrides named by `config`
    pub fn open(config: DataConfig) -> Result<Self> {
        let layer = load_zones(config.zones_path())?;
        let strategy = match config.strategy {
            StrategyKind::Substring => MatchStrategy::Substring,
            StrategyKind::Lookup => match config.lookup_path() {
                Some(path) => MatchStrategy::Exact(load_overrides(&path)?),
                None => MatchStrategy::Exact(NameOverrides::default()),
            },
        };
        info!(
            zones = layer.len(),
            strategy = strategy.name(),
            dir = %config.dir.display(),
            "Engine ready"
        );
        Ok(Self::from_parts(config, layer, strategy))
    }

    /// Engine over an already loaded layer
    pub fn from_parts(config: DataConfig, layer: ZoneLayer, strategy: MatchStrategy) -> Self {
        Self {
            config,
            layer: Arc::new(layer),
            strategy,
        }
    }

    /// Data configuration
    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    /// Shared zone layer
    pub fn layer(&self) -> &Arc<ZoneLayer> {
        &self.layer
    }

    /// Active matching strategy
    pub fn strategy(&self) -> &MatchStrategy {
        &self.strategy
    }

    /// Load the aggregated report for a quarter
    pub fn incidents(&self, quarter: Quarter) -> Result<IncidentTable> {
        Ok(load_quarter(&self.config.incident_source(), quarter)?)
    }

    /// Load a quarter and reconcile it onto the zones
    pub fn run(&self, quarter: Quarter) -> Result<QuarterRun> {
        let incidents = self.incidents(quarter)?;
        let reconciliation = reconcile(&self.layer.zones(), &incidents.records, &self.strategy);

        let report = &reconciliation.report;
        for conflict in &report.conflicts {
            warn!(
                alias = %conflict.alias,
                kept = %conflict.kept_zone,
                dropped = %conflict.dropped_zone,
                "Alias claimed by more than one zone"
            );
        }
        for double in &report.double_counted {
            warn!(
                zone = %double.zone,
                neighborhood = %double.neighborhood,
                hits = double.hits,
                "Incident row counted more than once"
            );
        }
        for name in &report.dangling_overrides {
            warn!(incident_name = %name, "Override points at an unknown alias");
        }
        for zone in &report.empty_aliases {
            warn!(zone = %zone, "Empty alias skipped; it would match every incident row");
        }
        info!(
            quarter = %quarter,
            strategy = %report.strategy,
            matched = report.matched_rows,
            unmatched = report.unmatched.len(),
            "Reconciled quarter"
        );

        Ok(QuarterRun {
            incidents,
            reconciliation,
        })
    }

    /// Build the map document for a selection
    pub fn render(
        &self,
        quarter: Quarter,
        crime: CrimeType,
        settings: &MapSettings,
    ) -> Result<MapDocument> {
        let run = self.run(quarter)?;
        Ok(MapDocument::build(
            &self.layer,
            &run.reconciliation.zones,
            crime,
            quarter,
            settings,
        )?)
    }
}

fn load_overrides(path: &Path) -> Result<NameOverrides> {
    let text = std::fs::read_to_string(path).map_err(|source| EngineError::LookupRead {
        path: path.to_path_buf(),
        source,
    })?;
    let overrides: NameOverrides = toml::from_str(&text).map_err(|source| EngineError::LookupParse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), overrides = overrides.names.len(), "Loaded name overrides");
    Ok(overrides)
}

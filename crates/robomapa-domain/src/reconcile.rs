//! Reconciliation of incident neighborhoods against zone aliases
//!
//! Two strategies are available:
//!
//! - [`MatchStrategy::Substring`]: an incident row contributes to a zone once
//!   for every alias of the zone contained in the row's neighborhood name.
//!   `"CENTRO SUR"` therefore matches alias `"CENTRO"`, and a row containing
//!   two aliases of the same zone is counted twice.
//! - [`MatchStrategy::Exact`]: rows resolve through a [`NameLookup`] keyed on
//!   normalized names, extended by reviewed [`NameOverrides`]. A row reaches
//!   at most one zone, at most once.
//!
//! Both strategies recompute totals from zero, so reconciling the same
//! inputs twice yields identical zones. Anomalies are collected in the
//! [`ReconcileReport`] instead of being corrected silently.

use crate::crime::CrimeTotals;
use crate::incident::IncidentRecord;
use crate::normalize::normalize_name;
use crate::zone::Zone;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Reviewed mapping from incident neighborhood names to zone aliases
///
/// Loaded from TOML:
///
/// ```toml
/// [names]
/// "COL. CENTRO" = "CENTRO"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameOverrides {
    /// Incident name → alias name
    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

impl NameOverrides {
    /// Add or replace one mapping
    pub fn insert(&mut self, incident_name: impl Into<String>, alias: impl Into<String>) {
        self.names.insert(incident_name.into(), alias.into());
    }
}

/// How incident neighborhood names are matched to zone aliases
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Case-sensitive literal substring match, once per alias
    Substring,

    /// Exact match on normalized names, with reviewed overrides
    Exact(NameOverrides),
}

impl MatchStrategy {
    /// Strategy name for reports and logs
    pub fn name(&self) -> &'static str {
        match self {
            MatchStrategy::Substring => "substring",
            MatchStrategy::Exact(_) => "exact",
        }
    }
}

impl Default for MatchStrategy {
    fn default() -> Self {
        MatchStrategy::Exact(NameOverrides::default())
    }
}

/// Alias claimed by more than one zone; the first zone keeps it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupConflict {
    /// Normalized alias
    pub alias: String,
    /// Zone that keeps the alias
    pub kept_zone: String,
    /// Zone whose claim was ignored
    pub dropped_zone: String,
}

/// Incident row matched by several aliases of the same zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoubleCount {
    /// Zone key
    pub zone: String,
    /// Incident neighborhood
    pub neighborhood: String,
    /// Incident postal code
    pub postal_code: String,
    /// Times the row was added to the zone
    pub hits: usize,
}

/// Incident row that contributed to more than one zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedRow {
    /// Incident neighborhood
    pub neighborhood: String,
    /// Incident postal code
    pub postal_code: String,
    /// Keys of every zone the row reached
    pub zones: Vec<String>,
}

/// Diagnostics from one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Strategy used
    pub strategy: String,
    /// Incident rows that reached at least one zone
    pub matched_rows: usize,
    /// Neighborhood names that reached no zone (sorted, unique)
    pub unmatched: Vec<String>,
    /// Rows counted more than once within one zone
    pub double_counted: Vec<DoubleCount>,
    /// Rows counted in more than one zone
    pub shared_rows: Vec<SharedRow>,
    /// Aliases claimed by several zones
    pub conflicts: Vec<LookupConflict>,
    /// Override targets that name no known alias
    pub dangling_overrides: Vec<String>,
    /// Zone keys with aliases that strip to empty; substring matching skips
    /// them instead of letting them match every row
    pub empty_aliases: Vec<String>,
}

impl ReconcileReport {
    /// True when no row was counted twice and the lookup had no conflicts
    pub fn is_clean(&self) -> bool {
        self.double_counted.is_empty()
            && self.shared_rows.is_empty()
            && self.conflicts.is_empty()
            && self.dangling_overrides.is_empty()
            && self.empty_aliases.is_empty()
    }
}

/// Zones with totals filled in, plus diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// Zones in input order
    pub zones: Vec<Zone>,
    /// Diagnostics
    pub report: ReconcileReport,
}

impl Reconciliation {
    /// Find a zone by key
    pub fn zone(&self, key: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.key == key)
    }
}

/// Exact-match table from normalized alias to zone index
#[derive(Debug, Clone, Default)]
pub struct NameLookup {
    keys: HashMap<String, usize>,
    overrides: HashMap<String, String>,
    conflicts: Vec<LookupConflict>,
    dangling: Vec<String>,
}

impl NameLookup {
    /// Build the table from every zone alias and the reviewed overrides
    pub fn build(zones: &[Zone], overrides: &NameOverrides) -> Self {
        let mut keys: HashMap<String, usize> = HashMap::new();
        let mut conflicts = Vec::new();

        for (index, zone) in zones.iter().enumerate() {
            for alias in zone.aliases.iter() {
                let key = normalize_name(alias);
                if key.is_empty() {
                    continue;
                }
                match keys.get(&key) {
                    Some(&owner) if owner != index => conflicts.push(LookupConflict {
                        alias: key,
                        kept_zone: zones[owner].key.clone(),
                        dropped_zone: zone.key.clone(),
                    }),
                    Some(_) => {}
                    None => {
                        keys.insert(key, index);
                    }
                }
            }
        }

        let mut dangling = BTreeSet::new();
        let overrides: HashMap<String, String> = overrides
            .names
            .iter()
            .map(|(from, to)| (normalize_name(from), normalize_name(to)))
            .inspect(|(_, to)| {
                if !keys.contains_key(to) {
                    dangling.insert(to.clone());
                }
            })
            .collect();

        Self {
            keys,
            overrides,
            conflicts,
            dangling: dangling.into_iter().collect(),
        }
    }

    /// Zone index for an incident neighborhood name
    pub fn resolve(&self, neighborhood: &str) -> Option<usize> {
        let key = normalize_name(neighborhood);
        match self.overrides.get(&key) {
            Some(target) => self.keys.get(target).copied(),
            None => self.keys.get(&key).copied(),
        }
    }

    /// Aliases claimed by more than one zone
    pub fn conflicts(&self) -> &[LookupConflict] {
        &self.conflicts
    }

    /// Number of distinct aliases
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when no alias is registered
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Fill zone totals from incident records
///
/// Returns new zones; the inputs are not modified. Zones with no matching
/// rows get zero totals.
pub fn reconcile(
    zones: &[Zone],
    incidents: &[IncidentRecord],
    strategy: &MatchStrategy,
) -> Reconciliation {
    let mut filled: Vec<Zone> = zones
        .iter()
        .cloned()
        .map(|mut zone| {
            zone.totals = CrimeTotals::default();
            zone
        })
        .collect();
    let mut reached: Vec<Vec<usize>> = vec![Vec::new(); incidents.len()];
    let mut report = ReconcileReport {
        strategy: strategy.name().to_string(),
        ..ReconcileReport::default()
    };

    match strategy {
        MatchStrategy::Substring => {
            report.empty_aliases = zones
                .iter()
                .filter(|zone| zone.aliases.dropped_empty() > 0)
                .map(|zone| zone.key.clone())
                .collect();
            for (zone_index, zone) in zones.iter().enumerate() {
                for (row_index, row) in incidents.iter().enumerate() {
                    let hits = zone
                        .aliases
                        .iter()
                        .filter(|alias| row.neighborhood.contains(alias))
                        .count();
                    if hits == 0 {
                        continue;
                    }
                    for _ in 0..hits {
                        filled[zone_index].totals.add(&row.counts);
                    }
                    reached[row_index].push(zone_index);
                    if hits > 1 {
                        report.double_counted.push(DoubleCount {
                            zone: zone.key.clone(),
                            neighborhood: row.neighborhood.clone(),
                            postal_code: row.postal_code.clone(),
                            hits,
                        });
                    }
                }
            }
        }
        MatchStrategy::Exact(overrides) => {
            let lookup = NameLookup::build(zones, overrides);
            for (row_index, row) in incidents.iter().enumerate() {
                if let Some(zone_index) = lookup.resolve(&row.neighborhood) {
                    filled[zone_index].totals.add(&row.counts);
                    reached[row_index].push(zone_index);
                }
            }
            report.conflicts = lookup.conflicts;
            report.dangling_overrides = lookup.dangling;
        }
    }

    let mut unmatched = BTreeSet::new();
    for (row, zone_indices) in incidents.iter().zip(reached.iter()) {
        match zone_indices.len() {
            0 => {
                unmatched.insert(row.neighborhood.clone());
            }
            1 => report.matched_rows += 1,
            _ => {
                report.matched_rows += 1;
                report.shared_rows.push(SharedRow {
                    neighborhood: row.neighborhood.clone(),
                    postal_code: row.postal_code.clone(),
                    zones: zone_indices.iter().map(|i| zones[*i].key.clone()).collect(),
                });
            }
        }
    }
    report.unmatched = unmatched.into_iter().collect();

    Reconciliation {
        zones: filled,
        report,
    }
}

//! Crime types and per-type totals

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Robbery category reported by the state prosecutor and public security office
///
/// Each category arrives as two reporting-phase columns in the quarterly
/// spreadsheets and is summed into a single total on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CrimeType {
    /// Robo a Casa Habitación (home burglary)
    #[serde(rename = "RACH")]
    Rach,

    /// Robo a Negocio (business robbery)
    #[serde(rename = "RAN")]
    Ran,

    /// Robo a Transeúnte (pedestrian robbery)
    #[serde(rename = "RAT")]
    Rat,

    /// Robo de Vehículo (vehicle theft)
    #[serde(rename = "RDV")]
    Rdv,

    /// Robo con Violencia (violent robbery)
    #[serde(rename = "RCV")]
    Rcv,
}

impl CrimeType {
    /// All crime types in spreadsheet column order
    pub const ALL: [CrimeType; 5] = [
        CrimeType::Rach,
        CrimeType::Ran,
        CrimeType::Rat,
        CrimeType::Rdv,
        CrimeType::Rcv,
    ];

    /// Column code used in the source spreadsheets
    pub fn code(&self) -> &'static str {
        match self {
            CrimeType::Rach => "RACH",
            CrimeType::Ran => "RAN",
            CrimeType::Rat => "RAT",
            CrimeType::Rdv => "RDV",
            CrimeType::Rcv => "RCV",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            CrimeType::Rach => "Robo a Casa Habitación",
            CrimeType::Ran => "Robo a Negocio",
            CrimeType::Rat => "Robo a Transeúnte",
            CrimeType::Rdv => "Robo de Vehículo",
            CrimeType::Rcv => "Robo con Violencia",
        }
    }

    /// Parse a crime type from its code (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "RACH" => Some(CrimeType::Rach),
            "RAN" => Some(CrimeType::Ran),
            "RAT" => Some(CrimeType::Rat),
            "RDV" => Some(CrimeType::Rdv),
            "RCV" => Some(CrimeType::Rcv),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        match self {
            CrimeType::Rach => 0,
            CrimeType::Ran => 1,
            CrimeType::Rat => 2,
            CrimeType::Rdv => 3,
            CrimeType::Rcv => 4,
        }
    }
}

impl Default for CrimeType {
    fn default() -> Self {
        CrimeType::Rach
    }
}

impl std::fmt::Display for CrimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CrimeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid crime type: {}", s))
    }
}

/// One count per crime type
///
/// Missing or unparseable counts are represented as zero, never as an
/// absent value. Serializes as a map keyed by crime code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrimeTotals {
    counts: [u64; 5],
}

impl CrimeTotals {
    /// Build totals from counts in `CrimeType::ALL` order
    pub fn from_counts(counts: [u64; 5]) -> Self {
        Self { counts }
    }

    /// Get the count for one crime type
    pub fn get(&self, crime: CrimeType) -> u64 {
        self.counts[crime.index()]
    }

    /// Set the count for one crime type
    pub fn set(&mut self, crime: CrimeType, value: u64) {
        self.counts[crime.index()] = value;
    }

    /// Add another set of totals into this one, saturating at `u64::MAX`
    pub fn add(&mut self, other: &CrimeTotals) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine = mine.saturating_add(*theirs);
        }
    }

    /// Sum across all crime types, saturating at `u64::MAX`
    pub fn sum(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, c| acc.saturating_add(*c))
    }

    /// True when every count is zero
    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|c| *c == 0)
    }

    /// Iterate `(crime, count)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (CrimeType, u64)> + '_ {
        CrimeType::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}

impl Serialize for CrimeTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (crime, count) in self.iter() {
            map.serialize_entry(crime.code(), &count)?;
        }
        map.end()
    }
}

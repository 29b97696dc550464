//! Column layout of the quarterly reports
//!
//! Columns are positional: `CP, COLONIA`, then the five crime types for
//! reporting phase 1, the same five for phase 2, and a trailing `FECHA`
//! that is not used.

use crate::cell::Cell;
use robomapa_domain::{normalize_name, normalize_postal_code, CrimeTotals, CrimeType, UNKNOWN_POSTAL_CODE};

const POSTAL_CODE: usize = 0;
const NEIGHBORHOOD: usize = 1;
const PHASE_ONE: usize = 2;
const PHASE_TWO: usize = PHASE_ONE + CrimeType::ALL.len();

/// Cells needed to hold both reporting phases
pub const MIN_COLUMNS: usize = PHASE_TWO + CrimeType::ALL.len();

/// Neighborhood names that stand for "location unknown" and never reach a zone
pub const EXCLUDED_NEIGHBORHOODS: [&str; 2] = ["ZONA NO LOCALIZADA", "ZONA FORÁNEA"];

/// One report row before aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIncidentRow {
    /// Upper-cased neighborhood
    pub neighborhood: String,
    /// Normalized postal code; `None` when the cell is blank or `nan`
    pub postal_code: Option<String>,
    /// Phase 1 counts
    pub phase_one: CrimeTotals,
    /// Phase 2 counts
    pub phase_two: CrimeTotals,
}

impl RawIncidentRow {
    /// Decode a data row; short rows are padded with empty cells
    ///
    /// Returns `None` when the neighborhood cell is blank.
    pub fn from_cells(cells: &[Cell]) -> Option<Self> {
        let cell = |i: usize| cells.get(i).unwrap_or(&Cell::Empty);

        let neighborhood = cell(NEIGHBORHOOD).text().to_uppercase();
        if neighborhood.is_empty() {
            return None;
        }

        let phase = |start: usize| {
            let mut totals = CrimeTotals::default();
            for (offset, crime) in CrimeType::ALL.iter().enumerate() {
                totals.set(*crime, cell(start + offset).count());
            }
            totals
        };

        Some(Self {
            neighborhood,
            postal_code: Some(normalize_postal_code(&cell(POSTAL_CODE).text()))
                .filter(|cp| cp != UNKNOWN_POSTAL_CODE),
            phase_one: phase(PHASE_ONE),
            phase_two: phase(PHASE_TWO),
        })
    }

    /// Both phases summed per crime type
    pub fn total(&self) -> CrimeTotals {
        let mut total = self.phase_one;
        total.add(&self.phase_two);
        total
    }

    /// True for the "unknown location" sentinels
    pub fn is_excluded(&self) -> bool {
        let key = normalize_name(&self.neighborhood);
        EXCLUDED_NEIGHBORHOODS
            .iter()
            .any(|sentinel| normalize_name(sentinel) == key)
    }
}

//! Incident records

use crate::crime::CrimeTotals;
use serde::Serialize;

/// Aggregated counts for one neighborhood and postal code in one quarter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentRecord {
    /// Upper-cased neighborhood name as reported
    pub neighborhood: String,

    /// Postal code
    pub postal_code: String,

    /// Both reporting phases summed per crime type
    pub counts: CrimeTotals,
}

impl IncidentRecord {
    /// Create a record
    pub fn new(
        neighborhood: impl Into<String>,
        postal_code: impl Into<String>,
        counts: CrimeTotals,
    ) -> Self {
        Self {
            neighborhood: neighborhood.into(),
            postal_code: postal_code.into(),
            counts,
        }
    }
}

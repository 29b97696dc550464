//! Zone module - dissolved neighborhood groups

use crate::alias::AliasList;
use crate::crime::CrimeTotals;
use serde::Serialize;

/// A named administrative area made of one or more neighborhoods
///
/// Geometry lives with the geo loader; this type only carries identity and
/// the totals filled in by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    /// Grouping key: the alias literal exactly as stored in the dataset
    pub key: String,

    /// Parsed alias names
    pub aliases: AliasList,

    /// Postal code of the first row in the group
    pub postal_code: String,

    /// Crime totals (zero until reconciled)
    pub totals: CrimeTotals,
}

impl Zone {
    /// Create a zone with zero totals
    pub fn new(key: impl Into<String>, aliases: AliasList, postal_code: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            aliases,
            postal_code: postal_code.into(),
            totals: CrimeTotals::default(),
        }
    }

    /// Display-friendly alias rendering
    pub fn display_name(&self) -> String {
        self.aliases.display()
    }
}

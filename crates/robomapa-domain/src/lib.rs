//! Robomapa Domain Layer
//!
//! Core model for the quarterly robbery choropleth: crime types, quarters,
//! zones with their alias lists, incident records, and the reconciler that
//! joins incident counts onto zones.
//!
//! ## Key Concepts
//!
//! - **Zone (NOMASEN)**: a group of neighborhoods dissolved into one polygon,
//!   identified by an ordered list of alias names
//! - **Incident record**: per-neighborhood, per-postal-code crime counts for a quarter
//! - **Reconciliation**: matching incident neighborhood names against zone aliases
//!   and summing counts into zone totals
//!
//! ## Architecture
//!
//! This crate holds no I/O and no geometry. Loaders (`robomapa-geo`,
//! `robomapa-incidents`) produce these types; the renderer consumes them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alias;
pub mod crime;
pub mod incident;
pub mod normalize;
pub mod quarter;
pub mod reconcile;
pub mod zone;

// Re-exports for convenience
pub use alias::{AliasError, AliasList};
pub use crime::{CrimeTotals, CrimeType};
pub use incident::IncidentRecord;
pub use normalize::{normalize_name, normalize_postal_code, UNKNOWN_POSTAL_CODE};
pub use quarter::Quarter;
pub use reconcile::{
    reconcile, DoubleCount, LookupConflict, MatchStrategy, NameLookup, NameOverrides,
    ReconcileReport, Reconciliation, SharedRow,
};
pub use zone::Zone;

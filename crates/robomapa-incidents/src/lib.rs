//! Robomapa Incident Loader
//!
//! Reads one quarterly incident report, sums the two reporting-phase columns
//! per crime type and aggregates the rows by neighborhood and postal code.
//!
//! # Architecture
//!
//! ```text
//! Incidencias-<QUARTER>.xlsx → cells → RawIncidentRow → aggregate → IncidentTable
//! ```
//!
//! Spreadsheets are read through `calamine`; CSV exports of the same layout
//! through `csv`.

#![warn(missing_docs)]

mod cell;
mod error;
mod layout;
mod reader;
mod table;

pub use cell::Cell;
pub use error::{IncidentError, Result};
pub use layout::{RawIncidentRow, EXCLUDED_NEIGHBORHOODS, MIN_COLUMNS};
pub use reader::read_rows;
pub use table::{aggregate, load_quarter, IncidentSource, IncidentTable, DEFAULT_PATTERN};

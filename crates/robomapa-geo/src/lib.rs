//! Robomapa Geo Loader
//!
//! Reads the zone dataset (CSV with a WKT `geometry` column), repairs the
//! encoding into `geo` types and dissolves rows sharing a zone key into one
//! multi-polygon per zone.
//!
//! # Examples
//!
//! ```no_run
//! use robomapa_geo::load_zones;
//!
//! let layer = load_zones("data/final-df-Leon.csv").unwrap();
//! println!("{} zones in {}", layer.len(), layer.crs());
//! ```

#![warn(missing_docs)]

mod error;
mod layer;
mod loader;

pub use error::{GeoError, Result};
pub use layer::{ZoneLayer, ZoneShape, DEFAULT_CRS};
pub use loader::{load_zones, read_zones, EXCLUDED_ZONE_KEY};

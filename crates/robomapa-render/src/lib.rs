//! Robomapa Renderer
//!
//! Turns a reconciled zone layer into an immutable [`MapDocument`]: a
//! GeoJSON choropleth colored by one crime type, one marker per zone
//! centroid, and a self-contained HTML page driving Leaflet and
//! Leaflet.markercluster in the browser.
//!
//! A document is built fresh for every (quarter, crime type) selection and
//! never modified afterwards.

#![warn(missing_docs)]

mod document;
mod error;
mod html;
mod scale;
mod settings;

pub use document::{MapDocument, Marker};
pub use error::{RenderError, Result};
pub use html::escape_html;
pub use scale::{ColorScale, PLASMA};
pub use settings::{MapSettings, PageContext, ATTRIBUTION_HTML};

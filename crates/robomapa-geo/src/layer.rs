//! Dissolved zone layer

use geo::{Centroid, MultiPolygon, Point};
use robomapa_domain::Zone;

/// Coordinate reference system label forced onto every layer
pub const DEFAULT_CRS: &str = "EPSG:4326";

/// One zone with its dissolved geometry
#[derive(Debug, Clone)]
pub struct ZoneShape {
    /// Zone identity (totals are zero in a freshly loaded layer)
    pub zone: Zone,

    /// Union of every polygon that shared the zone key
    pub geometry: MultiPolygon<f64>,
}

impl ZoneShape {
    /// Geometric centroid, `None` for an empty geometry
    pub fn centroid(&self) -> Option<Point<f64>> {
        self.geometry.centroid()
    }
}

/// Immutable set of dissolved zones, ordered by zone key
#[derive(Debug, Clone)]
pub struct ZoneLayer {
    crs: String,
    shapes: Vec<ZoneShape>,
}

impl ZoneLayer {
    /// Build a layer from already-dissolved shapes
    pub fn new(shapes: Vec<ZoneShape>) -> Self {
        Self {
            crs: DEFAULT_CRS.to_string(),
            shapes,
        }
    }

    /// CRS label
    pub fn crs(&self) -> &str {
        &self.crs
    }

    /// Shapes in key order
    pub fn shapes(&self) -> &[ZoneShape] {
        &self.shapes
    }

    /// Zone identities, in the same order as [`ZoneLayer::shapes`]
    pub fn zones(&self) -> Vec<Zone> {
        self.shapes.iter().map(|s| s.zone.clone()).collect()
    }

    /// Shape for a zone key
    pub fn get(&self, key: &str) -> Option<&ZoneShape> {
        self.shapes.iter().find(|s| s.zone.key == key)
    }

    /// Number of zones
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True when the layer holds no zones
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

//! Immutable map document

use crate::error::{RenderError, Result};
use crate::html::escape_html;
use crate::scale::ColorScale;
use crate::settings::MapSettings;
use geojson::{Feature, FeatureCollection, GeoJson};
use robomapa_domain::{CrimeType, Quarter, Zone};
use robomapa_geo::ZoneLayer;
use serde::Serialize;
use tracing::debug;

/// Clustered marker at a zone centroid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Zone key
    pub zone: String,
    /// Latitude (centroid y)
    pub lat: f64,
    /// Longitude (centroid x)
    pub lon: f64,
    /// Popup HTML (already escaped)
    pub popup: String,
}

/// Everything needed to draw one (quarter, crime type) selection
#[derive(Debug, Clone)]
pub struct MapDocument {
    quarter: Quarter,
    crime: CrimeType,
    settings: MapSettings,
    scale: ColorScale,
    features: FeatureCollection,
    markers: Vec<Marker>,
}

impl MapDocument {
    /// Build a document from the geometry layer and its reconciled zones
    ///
    /// `zones` must be in layer order, as returned by reconciling
    /// `layer.zones()`.
    pub fn build(
        layer: &ZoneLayer,
        zones: &[Zone],
        crime: CrimeType,
        quarter: Quarter,
        settings: &MapSettings,
    ) -> Result<Self> {
        if layer.len() != zones.len() {
            return Err(RenderError::ZoneCount {
                shapes: layer.len(),
                zones: zones.len(),
            });
        }

        let scale = ColorScale::plasma(zones.iter().map(|z| z.totals.get(crime) as f64));
        let mut features = Vec::with_capacity(zones.len());
        let mut markers = Vec::with_capacity(zones.len());

        for (shape, zone) in layer.shapes().iter().zip(zones) {
            if shape.zone.key != zone.key {
                return Err(RenderError::ZoneMismatch {
                    expected: shape.zone.key.clone(),
                    found: zone.key.clone(),
                });
            }

            let value = zone.totals.get(crime);
            let names = zone.display_name();

            let mut feature = Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(&shape.geometry))),
                id: None,
                properties: None,
                foreign_members: None,
            };
            feature.set_property("NOMASEN", zone.key.clone());
            feature.set_property("NOMASEN_STR", names.clone());
            feature.set_property("CP", zone.postal_code.clone());
            for (each, count) in zone.totals.iter() {
                feature.set_property(each.code(), count);
            }
            feature.set_property("value", value);
            feature.set_property("fill", scale.color(value as f64));
            feature.set_property(
                "tooltip",
                format!(
                    "<b>Colonias</b>: {}<br><b>{}</b>: {}",
                    escape_html(&names),
                    crime.code(),
                    value
                ),
            );
            features.push(feature);

            if let Some(centroid) = shape.centroid() {
                markers.push(Marker {
                    zone: zone.key.clone(),
                    lat: centroid.y(),
                    lon: centroid.x(),
                    popup: format!(
                        "Colonias: {}<br>{}: {}",
                        escape_html(&names),
                        crime.code(),
                        value
                    ),
                });
            }
        }
        debug!(
            quarter = %quarter,
            crime = %crime,
            features = features.len(),
            markers = markers.len(),
            "Built map document"
        );

        Ok(Self {
            quarter,
            crime,
            settings: settings.clone(),
            scale,
            features: FeatureCollection {
                bbox: None,
                features,
                foreign_members: None,
            },
            markers,
        })
    }

    /// Quarter shown
    pub fn quarter(&self) -> Quarter {
        self.quarter
    }

    /// Crime type shown
    pub fn crime(&self) -> CrimeType {
        self.crime
    }

    /// Map settings the document was built with
    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Color scale over the selected crime type
    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    /// Choropleth features
    pub fn features(&self) -> &FeatureCollection {
        &self.features
    }

    /// Centroid markers
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Feature collection as GeoJSON text
    pub fn to_geojson(&self) -> String {
        GeoJson::from(self.features.clone()).to_string()
    }
}

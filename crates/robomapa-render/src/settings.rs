//! Map and page settings

use serde::{Deserialize, Serialize};

/// Attribution footer citing the data sources
pub const ATTRIBUTION_HTML: &str = "Datos geográficos obtenidos de \
<a href=\"https://www.inegi.org.mx/app/ageeml/#\">INEGI</a> y datos de robos obtenidos del \
<a href=\"https://ocl.org.mx/mapa-ocl-org-mx/\">Observatorio Ciudadano</a>, de acuerdo a la \
Fiscalía General del Estado de Guanajuato y la Secretaría de Seguridad, Prevención y \
Protección Ciudadana.";

/// Base map configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// Initial center as `[lat, lon]`
    #[serde(default = "default_center")]
    pub center: [f64; 2],

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Tile URL template
    #[serde(default = "default_tiles")]
    pub tiles: String,

    /// Tile attribution shown in the map corner
    #[serde(default = "default_tile_attribution")]
    pub tile_attribution: String,

    /// Page title
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_center() -> [f64; 2] {
    [21.1167, -101.6833]
}

fn default_zoom() -> u8 {
    12
}

fn default_tiles() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_tile_attribution() -> String {
    "&copy; OpenStreetMap contributors".to_string()
}

fn default_title() -> String {
    "Robos totales reportados ante FGE y SSPPC por trimestre y colonia en León durante 2023"
        .to_string()
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
            tiles: default_tiles(),
            tile_attribution: default_tile_attribution(),
            title: default_title(),
        }
    }
}

/// How the page is embedded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// When set, the quarter and crime selectors submit a GET form here;
    /// otherwise the selection is shown as static text
    pub form_action: Option<String>,
}

impl PageContext {
    /// Page served by the dashboard with working selectors
    pub fn interactive(action: impl Into<String>) -> Self {
        Self {
            form_action: Some(action.into()),
        }
    }

    /// Standalone file with the selection baked in
    pub fn standalone() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = MapSettings::default();
        assert_eq!(settings.center, [21.1167, -101.6833]);
        assert_eq!(settings.zoom, 12);
        assert!(settings.title.contains("León"));
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: MapSettings = serde_json::from_str(r#"{"zoom": 14}"#).unwrap();
        assert_eq!(settings.zoom, 14);
        assert_eq!(settings.center, default_center());
    }
}

//! Standalone HTML page for a map document

use crate::document::MapDocument;
use crate::error::Result;
use crate::settings::{PageContext, ATTRIBUTION_HTML};
use robomapa_domain::{CrimeType, Quarter};
use std::fmt::Write;

const LEGEND_STEPS: usize = 6;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.css">
<link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css">
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/4.7.0/css/font-awesome.min.css">
<style>
body { font-family: sans-serif; margin: 0 auto; max-width: 1100px; padding: 1rem; }
#map { height: 640px; }
.controls { display: flex; gap: 1rem; margin: 0.5rem 0 1rem; flex-wrap: wrap; }
.zone-marker i { color: teal; font-size: 10px; }
.legend { background: white; padding: 6px 8px; line-height: 18px; }
.legend span { display: inline-block; width: 18px; height: 12px; margin-right: 4px; }
footer { margin-top: 1rem; font-size: 0.9rem; color: #444; }
</style>
</head>
<body>
<h1>__TITLE__</h1>
__CONTROLS__
<div id="map"></div>
<footer>__FOOTER__</footer>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script src="https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js"></script>
<script>
const data = __DATA__;
const map = L.map('map').setView(data.center, data.zoom);
L.tileLayer(data.tiles, { attribution: data.attribution, maxZoom: 19 }).addTo(map);
const baseStyle = f => ({ fillColor: f.properties.fill, fillOpacity: 0.8, color: '#000000', opacity: 0.01, weight: 1 });
const choropleth = L.geoJSON(data.features, {
  style: baseStyle,
  onEachFeature: (f, layer) => {
    layer.bindTooltip(f.properties.tooltip, { sticky: false });
    layer.on({
      mouseover: e => e.target.setStyle({ weight: 3, opacity: 0.6 }),
      mouseout: e => choropleth.resetStyle(e.target)
    });
  }
}).addTo(map);
const icon = L.divIcon({ className: 'zone-marker', html: '<i class="fa fa-circle"></i>', iconSize: [10, 10] });
const cluster = L.markerClusterGroup();
data.markers.forEach(m => cluster.addLayer(L.marker([m.lat, m.lon], { icon }).bindPopup(m.popup)));
map.addLayer(cluster);
const legend = L.control({ position: 'bottomright' });
legend.onAdd = () => {
  const div = L.DomUtil.create('div', 'legend');
  div.innerHTML = '<b>' + data.legendName + '</b><br>' +
    data.legend.map(s => '<span style="background:' + s.color + '"></span>' + s.value).join('<br>');
  return div;
};
legend.addTo(map);
</script>
</body>
</html>
"#;

/// Escape text for inclusion in HTML content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl MapDocument {
    /// Render the document as a self-contained HTML page
    pub fn to_html(&self, page: &PageContext) -> Result<String> {
        let settings = self.settings();
        let legend: Vec<serde_json::Value> = self
            .scale()
            .legend(LEGEND_STEPS)
            .into_iter()
            .map(|(value, color)| serde_json::json!({ "value": value.round() as u64, "color": color }))
            .collect();

        let data = serde_json::json!({
            "center": settings.center,
            "zoom": settings.zoom,
            "tiles": settings.tiles,
            "attribution": settings.tile_attribution,
            "features": self.features(),
            "markers": self.markers(),
            "legend": legend,
            "legendName": self.crime().code(),
        });
        // Keep "</script>" inside string values from closing the script element
        let data = serde_json::to_string(&data)?.replace("</", "<\\/");

        Ok(TEMPLATE
            .replace("__TITLE__", &escape_html(&settings.title))
            .replace("__CONTROLS__", &self.controls(page))
            .replace("__FOOTER__", ATTRIBUTION_HTML)
            .replace("__DATA__", &data))
    }

    fn controls(&self, page: &PageContext) -> String {
        let mut html = String::new();
        match &page.form_action {
            Some(action) => {
                let _ = write!(
                    html,
                    "<form class=\"controls\" method=\"get\" action=\"{}\">",
                    escape_html(action)
                );
                html.push_str("<label>Seleccionar trimestre <select name=\"quarter\" onchange=\"this.form.submit()\">");
                for quarter in Quarter::ALL {
                    push_option(&mut html, quarter.code(), quarter.code(), quarter == self.quarter());
                }
                html.push_str("</select></label>");
                html.push_str("<label>Seleccionar tipo de robo <select name=\"crime\" onchange=\"this.form.submit()\">");
                for crime in CrimeType::ALL {
                    push_option(&mut html, crime.code(), &crime_caption(crime), crime == self.crime());
                }
                html.push_str("</select></label>");
                html.push_str("<noscript><button type=\"submit\">Ver</button></noscript></form>");
            }
            None => {
                let _ = write!(
                    html,
                    "<div class=\"controls\"><span>Trimestre: <b>{}</b></span><span>Tipo de robo: <b>{}</b></span></div>",
                    self.quarter().code(),
                    escape_html(&crime_caption(self.crime()))
                );
            }
        }
        html
    }
}

fn crime_caption(crime: CrimeType) -> String {
    format!("{} ({})", crime.label(), crime.code())
}

fn push_option(html: &mut String, value: &str, caption: &str, selected: bool) {
    let _ = write!(
        html,
        "<option value=\"{}\"{}>{}</option>",
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(caption)
    );
}

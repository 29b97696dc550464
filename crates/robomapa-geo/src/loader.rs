//! Zone CSV loader

use crate::error::{GeoError, Result};
use crate::layer::{ZoneLayer, ZoneShape};
use geo::{BooleanOps, Geometry, MultiPolygon};
use robomapa_domain::{normalize_postal_code, AliasList, Zone};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use wkt::TryFromWkt;

/// Zone key marking rows that belong to no zone
pub const EXCLUDED_ZONE_KEY: &str = "0";

const ZONE_COLUMN: &str = "NOMASEN";
const GEOMETRY_COLUMN: &str = "geometry";
const POSTAL_CODE_COLUMN: &str = "CP";

struct Columns {
    zone: usize,
    geometry: usize,
    postal_code: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self> {
        // The unnamed index column ("" or "Unnamed: 0") is simply never looked up.
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        Ok(Self {
            zone: find(ZONE_COLUMN).ok_or(GeoError::MissingColumn(ZONE_COLUMN))?,
            geometry: find(GEOMETRY_COLUMN).ok_or(GeoError::MissingColumn(GEOMETRY_COLUMN))?,
            postal_code: find(POSTAL_CODE_COLUMN),
        })
    }
}

/// Rows sharing a key, waiting to be dissolved
struct Group {
    postal_code: String,
    parts: Vec<MultiPolygon<f64>>,
    first_row: usize,
}

/// Load and dissolve the zone file at `path`
pub fn load_zones<P: AsRef<Path>>(path: P) -> Result<ZoneLayer> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(GeoError::MissingFile(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    let layer = read_zones(file)?;
    info!(
        path = %path.display(),
        zones = layer.len(),
        crs = layer.crs(),
        "Loaded zone layer"
    );
    Ok(layer)
}

/// Read and dissolve zones from any CSV source
pub fn read_zones<R: Read>(source: R) -> Result<ZoneLayer> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);
    let columns = Columns::locate(reader.headers()?)?;

    let mut groups: BTreeMap<String, Group> = BTreeMap::new();
    let mut excluded = 0usize;

    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record?;
        let key = record.get(columns.zone).unwrap_or_default().trim();
        if key == EXCLUDED_ZONE_KEY {
            excluded += 1;
            continue;
        }

        let geometry = parse_geometry(record.get(columns.geometry).unwrap_or_default(), row)?;
        let postal_code = normalize_postal_code(
            columns
                .postal_code
                .and_then(|i| record.get(i))
                .unwrap_or_default(),
        );

        groups
            .entry(key.to_string())
            .or_insert_with(|| Group {
                postal_code,
                parts: Vec::new(),
                first_row: row,
            })
            .parts
            .push(geometry);
    }
    debug!(excluded, groups = groups.len(), "Grouped zone rows");

    let mut shapes = Vec::with_capacity(groups.len());
    for (key, group) in groups {
        let aliases = AliasList::parse_literal(&key).map_err(|source| GeoError::AliasLiteral {
            row: group.first_row,
            source,
        })?;
        shapes.push(ZoneShape {
            zone: Zone::new(key, aliases, group.postal_code),
            geometry: dissolve(group.parts),
        });
    }

    Ok(ZoneLayer::new(shapes))
}

fn parse_geometry(text: &str, row: usize) -> Result<MultiPolygon<f64>> {
    let geometry = Geometry::<f64>::try_from_wkt_str(text.trim()).map_err(|e| GeoError::Wkt {
        row,
        message: e.to_string(),
    })?;
    match geometry {
        Geometry::Polygon(polygon) => Ok(MultiPolygon::new(vec![polygon])),
        Geometry::MultiPolygon(multi) => Ok(multi),
        other => Err(GeoError::UnsupportedGeometry {
            row,
            kind: geometry_kind(&other),
        }),
    }
}

fn dissolve(parts: Vec<MultiPolygon<f64>>) -> MultiPolygon<f64> {
    let mut parts = parts.into_iter();
    let first = parts.next().unwrap_or_else(|| MultiPolygon::new(Vec::new()));
    parts.fold(first, |acc, next| acc.union(&next))
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

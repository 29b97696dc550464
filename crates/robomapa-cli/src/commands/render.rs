//! Render command implementation.

use crate::cli::RenderArgs;
use crate::error::Result;
use crate::output::Formatter;
use robomapa_domain::{CrimeType, Quarter};
use robomapa_engine::Engine;
use robomapa_render::{MapSettings, PageContext};
use std::fs;
use std::path::PathBuf;

/// Execute the render command.
pub fn execute_render(
    args: RenderArgs,
    engine: &Engine,
    map: &MapSettings,
    formatter: &Formatter,
) -> Result<()> {
    let path = write_map(engine, map, args.quarter, args.crime, args.out, args.geojson)?;
    println!(
        "{}",
        formatter.success(&format!(
            "{} {} map written to {}",
            args.quarter,
            args.crime,
            path.display()
        ))
    );
    Ok(())
}

/// Build a fresh document for the selection and write it to disk.
///
/// Returns the path written.
pub fn write_map(
    engine: &Engine,
    map: &MapSettings,
    quarter: Quarter,
    crime: CrimeType,
    out: Option<PathBuf>,
    geojson: bool,
) -> Result<PathBuf> {
    let document = engine.render(quarter, crime, map)?;
    let path = out.unwrap_or_else(|| default_output(quarter, crime, geojson));

    let contents = if geojson {
        document.to_geojson()
    } else {
        document.to_html(&PageContext::standalone())?
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, contents)?;
    Ok(path)
}

/// Default file name for a selection.
pub fn default_output(quarter: Quarter, crime: CrimeType, geojson: bool) -> PathBuf {
    let extension = if geojson { "geojson" } else { "html" };
    PathBuf::from(format!("robomapa-{}-{}.{}", quarter.code(), crime.code(), extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::fixture_engine;

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Quarter::AbrJun, CrimeType::Rdv, false),
            PathBuf::from("robomapa-ABR-JUN-RDV.html")
        );
        assert_eq!(
            default_output(Quarter::AbrJun, CrimeType::Rdv, true),
            PathBuf::from("robomapa-ABR-JUN-RDV.geojson")
        );
    }

    #[test]
    fn test_write_html_and_geojson() {
        let (dir, engine) = fixture_engine();
        let map = MapSettings::default();

        let html = dir.path().join("out/map.html");
        let written = write_map(&engine, &map, Quarter::EneMar, CrimeType::Rach, Some(html.clone()), false).unwrap();
        assert_eq!(written, html);
        let page = fs::read_to_string(&html).unwrap();
        assert!(page.contains("Colonias: CENTRO<br>RACH: 3"));
        assert!(!page.contains("<form"));

        let geo = dir.path().join("map.geojson");
        write_map(&engine, &map, Quarter::EneMar, CrimeType::Rach, Some(geo.clone()), true).unwrap();
        assert!(fs::read_to_string(&geo).unwrap().contains("FeatureCollection"));
    }
}

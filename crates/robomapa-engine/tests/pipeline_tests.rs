//! End-to-end pipeline tests over CSV fixtures

use robomapa_domain::{CrimeType, Quarter};
use robomapa_engine::{DataConfig, Engine, EngineError, StrategyKind};
use robomapa_render::MapSettings;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ZONES: &str = "\
,NOMASEN,CP,geometry
0,\"['CENTRO']\",37000,\"POLYGON((-101.69 21.11, -101.68 21.11, -101.68 21.12, -101.69 21.12, -101.69 21.11))\"
1,\"['OBREGON', 'OBREGON NORTE']\",37320,\"POLYGON((-101.67 21.13, -101.66 21.13, -101.66 21.14, -101.67 21.14, -101.67 21.13))\"
2,\"['SAN JUAN']\",37530,\"POLYGON((-101.65 21.10, -101.64 21.10, -101.64 21.11, -101.65 21.11, -101.65 21.10))\"
3,0,,\"POLYGON((0 0, 1 0, 1 1, 0 0))\"
";

const HEADER: &str = "CP,COLONIA,RACH,RAN,RAT,RDV,RCV,RACH,RAN,RAT,RDV,RCV,FECHA\n";

/// Row with RACH split over both phases and every other count zero
fn row(cp: &str, colonia: &str, phase_one: u64, phase_two: u64) -> String {
    format!("{cp},{colonia},{phase_one},0,0,0,0,{phase_two},0,0,0,0,2023-01-15\n")
}

fn fixture(rows: &[String]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("final-df-Leon.csv"), ZONES).unwrap();
    let mut text = HEADER.to_string();
    for r in rows {
        text.push_str(r);
    }
    fs::write(dir.path().join("Incidencias-ENE-MAR.csv"), text).unwrap();
    dir
}

fn config(dir: &Path, strategy: StrategyKind) -> DataConfig {
    DataConfig {
        incident_pattern: "Incidencias-{quarter}.csv".to_string(),
        strategy,
        ..DataConfig::in_dir(dir)
    }
}

fn standard_rows() -> Vec<String> {
    vec![
        row("37000", "Centro", 1, 2),
        row("37000", "Centro Sur", 5, 0),
        row("37320", "Obregon Norte", 2, 3),
        row("0", "Zona no localizada", 40, 40),
        row("0", "ZONA FORÁNEA", 7, 0),
    ]
}

fn rach(engine: &Engine, key: &str) -> u64 {
    let run = engine.run(Quarter::EneMar).unwrap();
    run.reconciliation.zone(key).unwrap().totals.get(CrimeType::Rach)
}

#[test]
fn test_substring_strategy_over_matches_and_double_counts() {
    let dir = fixture(&standard_rows());
    let engine = Engine::open(config(dir.path(), StrategyKind::Substring)).unwrap();

    // "CENTRO" (1+2) plus "CENTRO SUR" (5)
    assert_eq!(rach(&engine, "['CENTRO']"), 8);
    // "OBREGON NORTE" contains both aliases, so its 2+3 counts twice
    assert_eq!(rach(&engine, "['OBREGON', 'OBREGON NORTE']"), 10);
    assert_eq!(rach(&engine, "['SAN JUAN']"), 0);

    let report = engine.run(Quarter::EneMar).unwrap().reconciliation.report;
    assert_eq!(report.strategy, "substring");
    assert_eq!(report.double_counted.len(), 1);
    assert_eq!(report.double_counted[0].hits, 2);
    assert!(report.unmatched.is_empty());
}

#[test]
fn test_lookup_strategy_matches_exact_names_only() {
    let dir = fixture(&standard_rows());
    let engine = Engine::open(config(dir.path(), StrategyKind::Lookup)).unwrap();

    assert_eq!(rach(&engine, "['CENTRO']"), 3);
    assert_eq!(rach(&engine, "['OBREGON', 'OBREGON NORTE']"), 5);

    let report = engine.run(Quarter::EneMar).unwrap().reconciliation.report;
    assert_eq!(report.strategy, "exact");
    assert_eq!(report.unmatched, vec!["CENTRO SUR".to_string()]);
    assert!(report.double_counted.is_empty());
}

#[test]
fn test_lookup_overrides_file() {
    let dir = fixture(&standard_rows());
    fs::write(
        dir.path().join("lookup.toml"),
        "[names]\n\"CENTRO SUR\" = \"CENTRO\"\n",
    )
    .unwrap();
    let mut config = config(dir.path(), StrategyKind::Lookup);
    config.lookup_file = Some("lookup.toml".into());

    let engine = Engine::open(config).unwrap();

    assert_eq!(rach(&engine, "['CENTRO']"), 8);
    assert!(engine.run(Quarter::EneMar).unwrap().reconciliation.report.unmatched.is_empty());
}

#[test]
fn test_malformed_lookup_file() {
    let dir = fixture(&standard_rows());
    fs::write(dir.path().join("lookup.toml"), "[names\n").unwrap();
    let mut config = config(dir.path(), StrategyKind::Lookup);
    config.lookup_file = Some("lookup.toml".into());

    let err = Engine::open(config).unwrap_err();
    assert!(matches!(err, EngineError::LookupParse { .. }));
}

#[test]
fn test_sentinel_rows_never_reach_zones() {
    let dir = fixture(&standard_rows());
    let engine = Engine::open(config(dir.path(), StrategyKind::Substring)).unwrap();

    let run = engine.run(Quarter::EneMar).unwrap();
    assert!(run
        .incidents
        .records
        .iter()
        .all(|r| !r.neighborhood.starts_with("ZONA")));
    assert_eq!(run.incidents.totals().get(CrimeType::Rach), 13);
}

#[test]
fn test_sentinel_rows_skip_matching_aliases() {
    let dir = fixture(&standard_rows());
    let zones = format!(
        "{ZONES}4,\"['ZONA', 'LOCALIZADA']\",37999,\"POLYGON((-101.63 21.10, -101.62 21.10, -101.62 21.11, -101.63 21.11, -101.63 21.10))\"\n"
    );
    fs::write(dir.path().join("final-df-Leon.csv"), zones).unwrap();
    let engine = Engine::open(config(dir.path(), StrategyKind::Substring)).unwrap();

    let run = engine.run(Quarter::EneMar).unwrap();
    let zona = run.reconciliation.zone("['ZONA', 'LOCALIZADA']").unwrap();
    assert!(zona.totals.is_zero());
    assert!(run.reconciliation.report.unmatched.is_empty());
}

#[test]
fn test_rows_without_postal_code_reach_no_zone() {
    let mut rows = standard_rows();
    rows.push(row("", "Centro", 4, 0));
    let dir = fixture(&rows);
    let engine = Engine::open(config(dir.path(), StrategyKind::Substring)).unwrap();

    assert_eq!(rach(&engine, "['CENTRO']"), 8);
    let run = engine.run(Quarter::EneMar).unwrap();
    assert_eq!(run.incidents.totals().get(CrimeType::Rach), 13);
}

#[test]
fn test_zone_key_zero_is_excluded() {
    let dir = fixture(&standard_rows());
    let engine = Engine::open(config(dir.path(), StrategyKind::Lookup)).unwrap();
    assert_eq!(engine.layer().len(), 3);
    assert!(engine.layer().get("0").is_none());
}

#[test]
fn test_runs_are_idempotent() {
    let dir = fixture(&standard_rows());
    let engine = Engine::open(config(dir.path(), StrategyKind::Substring)).unwrap();

    let first = engine.run(Quarter::EneMar).unwrap().reconciliation;
    let second = engine.run(Quarter::EneMar).unwrap().reconciliation;
    assert_eq!(first, second);
}

#[test]
fn test_render_builds_fresh_document() {
    let dir = fixture(&standard_rows());
    let engine = Engine::open(config(dir.path(), StrategyKind::Lookup)).unwrap();

    let doc = engine
        .render(Quarter::EneMar, CrimeType::Rach, &MapSettings::default())
        .unwrap();
    assert_eq!(doc.features().features.len(), 3);
    assert_eq!(doc.markers().len(), 3);
    assert_eq!(doc.markers()[0].popup, "Colonias: CENTRO<br>RACH: 3");

    let other = engine
        .render(Quarter::EneMar, CrimeType::Rat, &MapSettings::default())
        .unwrap();
    assert_eq!(other.markers()[0].popup, "Colonias: CENTRO<br>RAT: 0");
}

#[test]
fn test_missing_quarter_file() {
    let dir = fixture(&standard_rows());
    let engine = Engine::open(config(dir.path(), StrategyKind::Lookup)).unwrap();

    let err = engine.run(Quarter::OctDic).unwrap_err();
    assert!(err.is_missing_file());
}

#[test]
fn test_missing_zone_file() {
    let dir = TempDir::new().unwrap();
    let err = Engine::open(config(dir.path(), StrategyKind::Lookup)).unwrap_err();
    assert!(err.is_missing_file());
}

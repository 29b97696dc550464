//! Aggregated incident table for one quarter

use crate::error::Result;
use crate::layout::RawIncidentRow;
use crate::reader::read_rows;
use robomapa_domain::{CrimeTotals, IncidentRecord, Quarter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default file name pattern; `{quarter}` is replaced by the quarter code
pub const DEFAULT_PATTERN: &str = "Incidencias-{quarter}.xlsx";

/// Where quarterly reports live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentSource {
    /// Directory holding the reports
    pub dir: PathBuf,

    /// File name pattern containing `{quarter}`
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

impl IncidentSource {
    /// Source with the default file name pattern
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pattern: default_pattern(),
        }
    }

    /// Path of the report for a quarter
    pub fn path_for(&self, quarter: Quarter) -> PathBuf {
        self.dir.join(self.pattern.replace("{quarter}", quarter.code()))
    }
}

/// Incident records for one quarter, ordered by (neighborhood, postal code)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentTable {
    /// Quarter covered
    pub quarter: Quarter,

    /// Aggregated records
    pub records: Vec<IncidentRecord>,
}

impl IncidentTable {
    /// Quarter-wide totals
    pub fn totals(&self) -> CrimeTotals {
        let mut totals = CrimeTotals::default();
        for record in &self.records {
            totals.add(&record.counts);
        }
        totals
    }

    /// Number of aggregated records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Group raw rows by (neighborhood, postal code), summing both phases
///
/// "Unknown location" sentinel rows are dropped, and so are rows without a
/// postal code: they have no group key.
pub fn aggregate<I>(rows: I) -> Vec<IncidentRecord>
where
    I: IntoIterator<Item = RawIncidentRow>,
{
    let mut groups: BTreeMap<(String, String), CrimeTotals> = BTreeMap::new();
    let mut excluded = 0usize;
    let mut missing_postal_code = 0usize;

    for row in rows {
        if row.is_excluded() {
            excluded += 1;
            continue;
        }
        let total = row.total();
        let Some(postal_code) = row.postal_code else {
            missing_postal_code += 1;
            continue;
        };
        groups
            .entry((row.neighborhood, postal_code))
            .or_default()
            .add(&total);
    }
    debug!(
        excluded,
        missing_postal_code,
        groups = groups.len(),
        "Aggregated incident rows"
    );

    groups
        .into_iter()
        .map(|((neighborhood, postal_code), counts)| {
            IncidentRecord::new(neighborhood, postal_code, counts)
        })
        .collect()
}

/// Load and aggregate the report for `quarter`
pub fn load_quarter(source: &IncidentSource, quarter: Quarter) -> Result<IncidentTable> {
    let path = source.path_for(quarter);
    load_file(&path, quarter)
}

fn load_file(path: &Path, quarter: Quarter) -> Result<IncidentTable> {
    let rows = read_rows(path)?;
    let raw_rows: Vec<RawIncidentRow> = rows
        .iter()
        .filter_map(|cells| RawIncidentRow::from_cells(cells))
        .collect();
    let skipped = rows.len() - raw_rows.len();

    let table = IncidentTable {
        quarter,
        records: aggregate(raw_rows),
    };
    info!(
        path = %path.display(),
        quarter = %quarter,
        records = table.len(),
        skipped,
        "Loaded incident table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use robomapa_domain::CrimeType;
    use std::io::Write;

    const HEADER: &str = "CP,COLONIA,RACH,RAN,RAT,RDV,RCV,RACH,RAN,RAT,RDV,RCV,FECHA";

    fn write_quarter(dir: &Path, quarter: Quarter, lines: &[&str]) {
        let path = dir.join(format!("Incidencias-{}.csv", quarter.code()));
        let mut file = std::fs::File::create(path).unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    fn csv_source(dir: &Path) -> IncidentSource {
        IncidentSource {
            dir: dir.to_path_buf(),
            pattern: "Incidencias-{quarter}.csv".to_string(),
        }
    }

    #[test]
    fn test_path_for_quarter() {
        let source = IncidentSource::new("data");
        assert_eq!(
            source.path_for(Quarter::JulSep),
            PathBuf::from("data").join("Incidencias-JUL-SEP.xlsx")
        );
    }

    #[test]
    fn test_phase_columns_sum_before_grouping() {
        let dir = tempfile::tempdir().unwrap();
        write_quarter(dir.path(), Quarter::EneMar, &["37000,Centro,2,0,0,0,0,3,0,0,0,0,2023-01-02"]);

        let table = load_quarter(&csv_source(dir.path()), Quarter::EneMar).unwrap();

        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].neighborhood, "CENTRO");
        assert_eq!(table.records[0].counts.get(CrimeType::Rach), 5);
    }

    #[test]
    fn test_groups_by_neighborhood_and_postal_code() {
        let dir = tempfile::tempdir().unwrap();
        write_quarter(
            dir.path(),
            Quarter::AbrJun,
            &[
                "37000,centro,1,0,0,0,0,0,0,0,0,0,",
                "37000,CENTRO,2,1,0,0,0,0,0,0,0,0,",
                "37100,CENTRO,4,0,0,0,0,0,0,0,0,0,",
                "37320,OBREGON,,,,,,1,1,1,1,1,",
            ],
        );

        let table = load_quarter(&csv_source(dir.path()), Quarter::AbrJun).unwrap();

        assert_eq!(table.len(), 3);
        let first = &table.records[0];
        assert_eq!((first.neighborhood.as_str(), first.postal_code.as_str()), ("CENTRO", "37000"));
        assert_eq!(first.counts.get(CrimeType::Rach), 3);
        assert_eq!(first.counts.get(CrimeType::Ran), 1);
        assert_eq!(table.records[1].postal_code, "37100");
        assert_eq!(table.records[2].counts.sum(), 5);
        assert_eq!(table.totals().get(CrimeType::Rach), 7);
    }

    #[test]
    fn test_sentinel_neighborhoods_removed() {
        let dir = tempfile::tempdir().unwrap();
        write_quarter(
            dir.path(),
            Quarter::OctDic,
            &[
                "37000,ZONA FORÁNEA,9,9,9,9,9,0,0,0,0,0,",
                "37000,Zona no localizada,9,0,0,0,0,0,0,0,0,0,",
                "37000,CENTRO,1,0,0,0,0,0,0,0,0,0,",
            ],
        );

        let table = load_quarter(&csv_source(dir.path()), Quarter::OctDic).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].neighborhood, "CENTRO");
    }

    #[test]
    fn test_rows_without_postal_code_dropped() {
        let dir = tempfile::tempdir().unwrap();
        write_quarter(
            dir.path(),
            Quarter::EneMar,
            &[
                "37000,CENTRO,1,0,0,0,0,0,0,0,0,0,",
                ",CENTRO,4,0,0,0,0,0,0,0,0,0,",
                "nan,OBREGON,2,0,0,0,0,0,0,0,0,0,",
            ],
        );

        let table = load_quarter(&csv_source(dir.path()), Quarter::EneMar).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].postal_code, "37000");
        assert_eq!(table.totals().get(CrimeType::Rach), 1);
    }

    #[test]
    fn test_huge_count_does_not_overflow() {
        let dir = tempfile::tempdir().unwrap();
        write_quarter(
            dir.path(),
            Quarter::EneMar,
            &[
                "37000,CENTRO,1e20,0,0,0,0,1,0,0,0,0,",
                "37000,CENTRO,5,0,0,0,0,0,0,0,0,0,",
            ],
        );

        let table = load_quarter(&csv_source(dir.path()), Quarter::EneMar).unwrap();

        assert_eq!(table.records[0].counts.get(CrimeType::Rach), u64::MAX);
        assert_eq!(table.totals().sum(), u64::MAX);
    }

    #[test]
    fn test_missing_quarter_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_quarter(&csv_source(dir.path()), Quarter::JulSep).unwrap_err();
        assert!(matches!(err, crate::IncidentError::MissingFile(_)));
    }
}

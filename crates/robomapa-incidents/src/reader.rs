//! File readers producing data rows of [`Cell`]s (header row skipped)

use crate::cell::Cell;
use crate::error::{IncidentError, Result};
use calamine::{open_workbook_auto, Reader};
use std::path::Path;
use tracing::debug;

/// Read every data row of a report file
///
/// The format is chosen by extension: `xlsx`, `xlsm`, `xlsb`, `xls` and
/// `ods` go through calamine (first worksheet), `csv` through the csv reader.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<Cell>>> {
    if !path.exists() {
        return Err(IncidentError::MissingFile(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        "csv" => read_csv(path)?,
        other => return Err(IncidentError::UnsupportedFormat(other.to_string())),
    };
    debug!(path = %path.display(), rows = rows.len(), "Read incident rows");
    Ok(rows)
}

fn read_workbook(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IncidentError::EmptyWorkbook(path.to_path_buf()))??;

    Ok(range
        .rows()
        .skip(1)
        .map(|row| row.iter().map(Cell::from).collect())
        .collect())
}

fn read_csv(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::from_field).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_csv_skips_header() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "CP,COLONIA,RACH").unwrap();
        writeln!(file, "37000,CENTRO,2").unwrap();
        writeln!(file, "37100,OBREGON").unwrap();

        let rows = read_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], Cell::Text("CENTRO".into()));
        assert_eq!(rows[1].len(), 2);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let err = read_rows(file.path()).unwrap_err();
        assert!(matches!(err, IncidentError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_rows(Path::new("/nonexistent/Incidencias-ENE-MAR.xlsx")).unwrap_err();
        assert!(matches!(err, IncidentError::MissingFile(_)));
    }

    #[test]
    fn test_corrupt_workbook_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"not a zip archive").unwrap();
        let err = read_rows(file.path()).unwrap_err();
        assert!(matches!(err, IncidentError::Spreadsheet(_)));
    }
}

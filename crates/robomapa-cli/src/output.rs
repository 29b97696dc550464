//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use robomapa_domain::{CrimeType, Quarter, ReconcileReport, Zone};
use std::path::PathBuf;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Report file status for one quarter.
#[derive(Debug, Clone)]
pub struct QuarterStatus {
    /// Quarter
    pub quarter: Quarter,
    /// Expected report path
    pub path: PathBuf,
    /// Whether the file exists
    pub present: bool,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format reconciled zone totals.
    pub fn format_zones(&self, zones: &[Zone]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(zones)?),
            OutputFormat::Table => Ok(self.format_zones_table(zones)),
            OutputFormat::Quiet => Ok(zones
                .iter()
                .map(|z| format!("{}\t{}", z.display_name(), z.totals.sum()))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_zones_table(&self, zones: &[Zone]) -> String {
        if zones.is_empty() {
            return self.colorize("No zones loaded.", "yellow");
        }

        let mut builder = Builder::default();
        let mut header = vec!["Colonias".to_string(), "CP".to_string()];
        header.extend(CrimeType::ALL.iter().map(|c| c.code().to_string()));
        header.push("Total".to_string());
        builder.push_record(header);

        for zone in zones {
            let mut record = vec![truncate(&zone.display_name(), 48), zone.postal_code.clone()];
            record.extend(zone.totals.iter().map(|(_, count)| count.to_string()));
            record.push(zone.totals.sum().to_string());
            builder.push_record(record);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the names that reached no zone, plus matching anomalies.
    pub fn format_unmatched(&self, report: &ReconcileReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(report.unmatched.join("\n")),
            OutputFormat::Table => {
                let mut lines = Vec::new();
                if report.unmatched.is_empty() {
                    lines.push(self.success("Every incident row reached a zone"));
                } else {
                    let mut builder = Builder::default();
                    builder.push_record(["Unmatched neighborhood"]);
                    for name in &report.unmatched {
                        builder.push_record([name.as_str()]);
                    }
                    let mut table = builder.build();
                    table.with(Style::rounded());
                    lines.push(table.to_string());
                }
                for double in &report.double_counted {
                    lines.push(self.warning(&format!(
                        "{} ({}) counted {} times in zone {}",
                        double.neighborhood, double.postal_code, double.hits, double.zone
                    )));
                }
                for shared in &report.shared_rows {
                    lines.push(self.warning(&format!(
                        "{} ({}) reached {} zones: {}",
                        shared.neighborhood,
                        shared.postal_code,
                        shared.zones.len(),
                        shared.zones.join(" | ")
                    )));
                }
                for conflict in &report.conflicts {
                    lines.push(self.warning(&format!(
                        "Alias {} kept by {} and dropped from {}",
                        conflict.alias, conflict.kept_zone, conflict.dropped_zone
                    )));
                }
                for name in &report.dangling_overrides {
                    lines.push(self.warning(&format!("Override for {} names no known alias", name)));
                }
                for zone in &report.empty_aliases {
                    lines.push(self.warning(&format!("Empty alias in zone {} was skipped", zone)));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format the report file status of every quarter.
    pub fn format_quarters(&self, quarters: &[QuarterStatus]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = quarters
                    .iter()
                    .map(|q| {
                        serde_json::json!({
                            "quarter": q.quarter,
                            "path": q.path.display().to_string(),
                            "present": q.present,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(quarters
                .iter()
                .filter(|q| q.present)
                .map(|q| q.quarter.code())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Quarter", "Report", "Status"]);
                for q in quarters {
                    let status = if q.present {
                        self.colorize("present", "green")
                    } else {
                        self.colorize("missing", "red")
                    };
                    builder.push_record([
                        q.quarter.code().to_string(),
                        q.path.display().to_string(),
                        status,
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use robomapa_domain::{AliasList, DoubleCount};

    fn zones() -> Vec<Zone> {
        let mut centro = Zone::new("['CENTRO']", AliasList::new(["CENTRO"]), "37000");
        centro.totals.set(CrimeType::Rach, 8);
        centro.totals.set(CrimeType::Rcv, 1);
        vec![
            centro,
            Zone::new("['SAN JUAN']", AliasList::new(["SAN JUAN"]), "37530"),
        ]
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_zones(&zones()).unwrap();
        assert!(output.contains("Colonias"));
        assert!(output.contains("RACH"));
        assert!(output.contains("CENTRO"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_zones(&zones()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["totals"]["RACH"], 8);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_zones(&zones()).unwrap();
        assert_eq!(output, "CENTRO\t9\nSAN JUAN\t0");
    }

    #[test]
    fn test_empty_zones() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_zones(&[]).unwrap();
        assert!(output.contains("No zones loaded"));
    }

    #[test]
    fn test_unmatched_with_double_count() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let report = ReconcileReport {
            unmatched: vec!["CENTRO SUR".to_string()],
            double_counted: vec![DoubleCount {
                zone: "['OBREGON', 'OBREGON NORTE']".to_string(),
                neighborhood: "OBREGON NORTE".to_string(),
                postal_code: "37320".to_string(),
                hits: 2,
            }],
            ..ReconcileReport::default()
        };

        let output = formatter.format_unmatched(&report).unwrap();
        assert!(output.contains("CENTRO SUR"));
        assert!(output.contains("⚠ OBREGON NORTE (37320) counted 2 times"));

        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_unmatched(&report).unwrap(), "CENTRO SUR");
    }

    #[test]
    fn test_unmatched_lists_empty_aliases() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let report = ReconcileReport {
            empty_aliases: vec!["['', 'CENTRO']".to_string()],
            ..ReconcileReport::default()
        };

        let output = formatter.format_unmatched(&report).unwrap();
        assert!(output.contains("⚠ Empty alias in zone ['', 'CENTRO'] was skipped"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("CENTRO", 10), "CENTRO");
        assert_eq!(truncate("SAN JUAN DE DIOS", 6), "SAN J…");
    }
}

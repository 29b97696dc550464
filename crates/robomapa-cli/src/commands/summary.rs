//! Summary command implementation.

use crate::cli::SummaryArgs;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use robomapa_domain::{CrimeType, Zone};
use robomapa_engine::Engine;

/// Execute the summary command.
pub fn execute_summary(args: SummaryArgs, engine: &Engine, formatter: &Formatter) -> Result<()> {
    let run = engine.run(args.quarter)?;
    let zones = ranked(run.reconciliation.zones, args.crime, args.limit);

    println!("{}", formatter.format_zones(&zones)?);

    if formatter.format() == OutputFormat::Table {
        let report = &run.reconciliation.report;
        println!(
            "{}",
            formatter.info(&format!(
                "{}: {} incident rows matched, {} unmatched ({} strategy)",
                args.quarter,
                report.matched_rows,
                report.unmatched.len(),
                report.strategy
            ))
        );
        if !report.double_counted.is_empty() {
            println!(
                "{}",
                formatter.warning(&format!(
                    "{} rows counted more than once; run 'unmatched' for details",
                    report.double_counted.len()
                ))
            );
        }
    }
    Ok(())
}

/// Sort by a crime type (highest first, stable) and cut to `limit`.
pub fn ranked(mut zones: Vec<Zone>, crime: Option<CrimeType>, limit: Option<usize>) -> Vec<Zone> {
    if let Some(crime) = crime {
        zones.sort_by(|a, b| b.totals.get(crime).cmp(&a.totals.get(crime)));
    }
    if let Some(limit) = limit {
        zones.truncate(limit);
    }
    zones
}

#[cfg(test)]
mod tests {
    use super::*;
    use robomapa_domain::AliasList;

    fn zone(name: &str, rach: u64) -> Zone {
        let mut zone = Zone::new(name, AliasList::new([name]), "37000");
        zone.totals.set(CrimeType::Rach, rach);
        zone
    }

    #[test]
    fn test_ranked_keeps_order_without_crime() {
        let zones = ranked(vec![zone("A", 1), zone("B", 5)], None, None);
        assert_eq!(zones[0].key, "A");
    }

    #[test]
    fn test_ranked_by_crime_with_limit() {
        let zones = ranked(
            vec![zone("A", 1), zone("B", 5), zone("C", 5), zone("D", 0)],
            Some(CrimeType::Rach),
            Some(2),
        );
        let keys: Vec<&str> = zones.iter().map(|z| z.key.as_str()).collect();
        assert_eq!(keys, vec!["B", "C"]);
    }
}

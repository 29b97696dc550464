//! Quarters command implementation.

use crate::error::Result;
use crate::output::{Formatter, QuarterStatus};
use robomapa_domain::Quarter;
use robomapa_engine::DataConfig;

/// Execute the quarters command.
pub fn execute_quarters(data: &DataConfig, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_quarters(&quarter_status(data))?);
    Ok(())
}

/// Expected report path and presence for every quarter.
pub fn quarter_status(data: &DataConfig) -> Vec<QuarterStatus> {
    let source = data.incident_source();
    Quarter::ALL
        .iter()
        .map(|&quarter| {
            let path = source.path_for(quarter);
            QuarterStatus {
                quarter,
                present: path.exists(),
                path,
            }
        })
        .collect()
}

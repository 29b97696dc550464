//! Unmatched command implementation.

use crate::cli::UnmatchedArgs;
use crate::error::Result;
use crate::output::Formatter;
use robomapa_engine::Engine;

/// Execute the unmatched command.
pub fn execute_unmatched(args: UnmatchedArgs, engine: &Engine, formatter: &Formatter) -> Result<()> {
    let run = engine.run(args.quarter)?;
    println!("{}", formatter.format_unmatched(&run.reconciliation.report)?);
    Ok(())
}

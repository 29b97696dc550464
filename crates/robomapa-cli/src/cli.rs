//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use robomapa_domain::{CrimeType, Quarter};
use robomapa_engine::StrategyKind;
use std::path::PathBuf;

/// Robomapa - Quarterly robbery choropleth for León neighborhoods.
#[derive(Debug, Parser)]
#[command(name = "robomapa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ROBOMAPA_CONFIG")]
    pub config: Option<String>,

    /// Data directory (overrides the configured one)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Matching strategy (overrides the configured one)
    #[arg(short, long, value_enum, global = true)]
    pub strategy: Option<StrategyArg>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (keys and values only)
    Quiet,
}

/// Matching strategy options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StrategyArg {
    /// Exact normalized names plus reviewed overrides
    Lookup,
    /// Legacy substring matching
    Substring,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the map for a quarter and crime type
    Render(RenderArgs),

    /// Show zone totals for a quarter
    Summary(SummaryArgs),

    /// List incident names that reached no zone
    Unmatched(UnmatchedArgs),

    /// List quarters and whether their reports are present
    Quarters,

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the render command.
#[derive(Debug, Parser)]
pub struct RenderArgs {
    /// Quarter (ENE-MAR, ABR-JUN, JUL-SEP, OCT-DIC)
    #[arg(short, long, default_value = "ENE-MAR", value_parser = parse_quarter)]
    pub quarter: Quarter,

    /// Crime type (RACH, RAN, RAT, RDV, RCV)
    #[arg(short = 't', long, default_value = "RACH", value_parser = parse_crime)]
    pub crime: CrimeType,

    /// Output file (default: robomapa-<QUARTER>-<CRIME>.html)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Write GeoJSON features instead of an HTML page
    #[arg(long)]
    pub geojson: bool,
}

/// Arguments for the summary command.
#[derive(Debug, Parser)]
pub struct SummaryArgs {
    /// Quarter (ENE-MAR, ABR-JUN, JUL-SEP, OCT-DIC)
    #[arg(short, long, default_value = "ENE-MAR", value_parser = parse_quarter)]
    pub quarter: Quarter,

    /// Sort zones by this crime type, highest first
    #[arg(short = 't', long, value_parser = parse_crime)]
    pub crime: Option<CrimeType>,

    /// Maximum number of zones
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the unmatched command.
#[derive(Debug, Parser)]
pub struct UnmatchedArgs {
    /// Quarter (ENE-MAR, ABR-JUN, JUL-SEP, OCT-DIC)
    #[arg(short, long, default_value = "ENE-MAR", value_parser = parse_quarter)]
    pub quarter: Quarter,
}

fn parse_quarter(s: &str) -> Result<Quarter, String> {
    Quarter::parse(s).ok_or_else(|| format!("unknown quarter '{}' (expected ENE-MAR, ABR-JUN, JUL-SEP or OCT-DIC)", s))
}

fn parse_crime(s: &str) -> Result<CrimeType, String> {
    CrimeType::parse(s).ok_or_else(|| format!("unknown crime type '{}' (expected RACH, RAN, RAT, RDV or RCV)", s))
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<StrategyArg> for StrategyKind {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::Lookup => StrategyKind::Lookup,
            StrategyArg::Substring => StrategyKind::Substring,
        }
    }
}

//! Robomapa CLI library.
//!
//! Command-line front end for the robbery map: renders pages to disk,
//! prints zone totals and unmatched neighborhood names, and offers a REPL
//! that re-renders the map whenever the quarter or crime type changes.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;

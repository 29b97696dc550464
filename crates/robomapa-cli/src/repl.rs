//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Holds the current quarter and crime type; changing either rebuilds the
//! map and rewrites the output page.

use crate::commands::{quarters::quarter_status, summary::ranked, write_map};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use robomapa_domain::{CrimeType, Quarter};
use robomapa_engine::Engine;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

const DEFAULT_OUTPUT: &str = "robomapa.html";

/// Current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Quarter shown
    pub quarter: Quarter,
    /// Crime type shown
    pub crime: CrimeType,
    /// Page rewritten on every change
    pub out: PathBuf,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            quarter: Quarter::default(),
            crime: CrimeType::default(),
            out: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Run the interactive REPL.
pub fn run_repl(config: &Config, engine: &Engine, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Robomapa REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(readline_error)?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(readline_error)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut selection = Selection::default();

    loop {
        let prompt = format!("robomapa [{} {}]> ", selection.quarter, selection.crime);

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, &mut selection, config, engine, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Leave the REPL
    Exit,
    /// Print the command list
    Help,
    /// Show the current selection
    Status,
    /// Select a quarter and re-render
    Quarter(Quarter),
    /// Select a crime type and re-render
    Crime(CrimeType),
    /// Re-render, optionally changing the output file
    Render(Option<PathBuf>),
    /// Zone totals for the current quarter, ranked by the current crime type
    Summary(Option<usize>),
    /// Incident names that reached no zone
    Unmatched,
    /// Report file status
    Quarters,
}

/// Parse a REPL command line.
pub fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "status" => Ok(ReplCommand::Status),
        "quarter" | "trimestre" => {
            let code = parts
                .get(1)
                .ok_or_else(|| CliError::InvalidInput("Usage: quarter <ENE-MAR|ABR-JUN|JUL-SEP|OCT-DIC>".to_string()))?;
            Quarter::parse(code)
                .map(ReplCommand::Quarter)
                .ok_or_else(|| CliError::InvalidInput(format!("Unknown quarter: {}", code)))
        }
        "crime" | "robo" => {
            let code = parts
                .get(1)
                .ok_or_else(|| CliError::InvalidInput("Usage: crime <RACH|RAN|RAT|RDV|RCV>".to_string()))?;
            CrimeType::parse(code)
                .map(ReplCommand::Crime)
                .ok_or_else(|| CliError::InvalidInput(format!("Unknown crime type: {}", code)))
        }
        "render" => Ok(ReplCommand::Render(parts.get(1).map(|p| PathBuf::from(*p)))),
        "summary" => {
            let limit = match parts.get(1) {
                None => None,
                Some(n) => Some(n.parse().map_err(|_| {
                    CliError::InvalidInput(format!("Limit must be a number: {}", n))
                })?),
            };
            Ok(ReplCommand::Summary(limit))
        }
        "unmatched" => Ok(ReplCommand::Unmatched),
        "quarters" => Ok(ReplCommand::Quarters),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

/// Execute a REPL command against the current selection.
fn execute_repl_command(
    cmd: ReplCommand,
    selection: &mut Selection,
    config: &Config,
    engine: &Engine,
    formatter: &Formatter,
) -> Result<()> {
    let next = match cmd {
        ReplCommand::Quarter(quarter) => Selection {
            quarter,
            ..selection.clone()
        },
        ReplCommand::Crime(crime) => Selection {
            crime,
            ..selection.clone()
        },
        ReplCommand::Render(out) => Selection {
            out: out.unwrap_or_else(|| selection.out.clone()),
            ..selection.clone()
        },
        ReplCommand::Status => {
            println!(
                "{}",
                formatter.info(&format!(
                    "Quarter {} | {} ({}) | strategy {} | output {}",
                    selection.quarter,
                    selection.crime.label(),
                    selection.crime,
                    engine.strategy().name(),
                    selection.out.display()
                ))
            );
            return Ok(());
        }
        ReplCommand::Summary(limit) => {
            let run = engine.run(selection.quarter)?;
            let zones = ranked(run.reconciliation.zones, Some(selection.crime), limit.or(Some(20)));
            println!("{}", formatter.format_zones(&zones)?);
            return Ok(());
        }
        ReplCommand::Unmatched => {
            let run = engine.run(selection.quarter)?;
            println!("{}", formatter.format_unmatched(&run.reconciliation.report)?);
            return Ok(());
        }
        ReplCommand::Quarters => {
            println!("{}", formatter.format_quarters(&quarter_status(engine.config()))?);
            return Ok(());
        }
        ReplCommand::Exit | ReplCommand::Help => return Ok(()),
    };

    // The selection only moves once the page on disk shows it
    let path = write_map(
        engine,
        &config.map,
        next.quarter,
        next.crime,
        Some(next.out.clone()),
        false,
    )?;
    println!(
        "{}",
        formatter.success(&format!(
            "{} {} map written to {}",
            next.quarter,
            next.crime,
            path.display()
        ))
    );
    *selection = next;

    Ok(())
}

fn readline_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e)))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::home_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  quarter <Q>         - Select quarter (ENE-MAR|ABR-JUN|JUL-SEP|OCT-DIC) and re-render");
    println!("  crime <C>           - Select crime type (RACH|RAN|RAT|RDV|RCV) and re-render");
    println!("  render [file]       - Re-render, optionally to a new file (default: robomapa.html)");
    println!("  summary [limit]     - Zone totals ranked by the selected crime type");
    println!("  unmatched           - Incident names that reached no zone");
    println!("  quarters            - Report files and whether they exist");
    println!("  status              - Show the current selection");
    println!("  help, ?             - Show this help");
    println!("  exit, quit, q       - Exit REPL");
    println!();
}

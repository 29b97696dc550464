//! Robomapa CLI - Quarterly robbery choropleth for León neighborhoods.

use clap::Parser;
use robomapa_cli::commands;
use robomapa_cli::repl;
use robomapa_cli::{Cli, Command, Config, Formatter};
use robomapa_engine::Engine;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> robomapa_cli::Result<()> {
    // Explicit path must exist; the default location is optional
    let mut config = match &cli.config {
        Some(path) => Config::load_from(Path::new(path))?,
        None => Config::load()?,
    };

    if let Some(dir) = cli.data_dir {
        config.data.dir = dir;
    }
    if let Some(strategy) = cli.strategy {
        config.data.strategy = strategy.into();
    }
    debug!(
        data_dir = %config.data.dir.display(),
        strategy = ?config.data.strategy,
        "Resolved configuration"
    );

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let open_engine = || Engine::open(config.data.clone());

    match cli.command.unwrap_or(Command::Repl) {
        Command::Quarters => {
            commands::execute_quarters(&config.data, &formatter)?;
        }
        Command::Repl => {
            repl::run_repl(&config, &open_engine()?, &formatter)?;
        }
        Command::Render(args) => {
            commands::execute_render(args, &open_engine()?, &config.map, &formatter)?;
        }
        Command::Summary(args) => {
            commands::execute_summary(args, &open_engine()?, &formatter)?;
        }
        Command::Unmatched(args) => {
            commands::execute_unmatched(args, &open_engine()?, &formatter)?;
        }
    }

    Ok(())
}

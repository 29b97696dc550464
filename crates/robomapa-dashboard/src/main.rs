//! Robomapa Dashboard server
//!
//! Starts the HTTP server for the interactive robbery map.

use anyhow::Context;
use robomapa_dashboard::{config::DashboardConfig, start_server};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        DashboardConfig::from_file(config_path)
            .with_context(|| format!("loading {}", config_path))?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        return Ok(());
    } else {
        eprintln!("Warning: No config file specified, using defaults (data from ./data)");
        eprintln!("Usage: robomapa-dashboard --config <path-to-config.toml>");
        eprintln!();
        DashboardConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Robomapa Dashboard - Quarterly robbery map for León");
    println!();
    println!("USAGE:");
    println!("    robomapa-dashboard --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    bind_address / bind_port   Listen address (default 127.0.0.1:8080)");
    println!("    [data]                     dir, zones_file, incident_pattern, lookup_file, strategy");
    println!("    [map]                      center, zoom, tiles, tile_attribution, title");
    println!();
    println!("Set RUST_LOG to change log verbosity (default: info).");
}

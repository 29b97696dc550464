//! Robomapa Dashboard
//!
//! Serves the interactive map: a page with quarter and crime-type selectors
//! over a Leaflet choropleth, plus GeoJSON and report endpoints.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::DashboardConfig;
use handlers::{create_router, AppState};
use robomapa_engine::{Engine, EngineError};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Dashboard error
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Zone layer or lookup file could not be loaded
    #[error("Failed to load data: {0}")]
    Engine(#[from] EngineError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the dashboard HTTP server
///
/// Loads the zone layer once, then serves until the process stops.
pub async fn start_server(config: DashboardConfig) -> Result<(), DashboardError> {
    info!("Starting Robomapa dashboard");
    info!("Bind address: {}", config.bind_addr());
    info!("Data directory: {}", config.data.dir.display());

    let data = config.data.clone();
    let engine = tokio::task::spawn_blocking(move || Engine::open(data))
        .await
        .map_err(|e| DashboardError::Server(e.to_string()))??;

    let state = AppState {
        engine: Arc::new(engine),
        map: Arc::new(config.map.clone()),
    };
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Dashboard listening on http://{}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| DashboardError::Server(e.to_string()))?;

    Ok(())
}

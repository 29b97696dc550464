//! HTTP request handlers for the dashboard.
//!
//! Every request re-runs the pipeline for its (quarter, crime type)
//! selection on the blocking pool; only the zone layer is shared.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router as AxumRouter,
};
use robomapa_domain::{CrimeTotals, CrimeType, Quarter, ReconcileReport, Zone};
use robomapa_engine::{Engine, EngineError};
use robomapa_render::{MapSettings, PageContext, RenderError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Pipeline over the shared zone layer
    pub engine: Arc<Engine>,
    /// Base map settings
    pub map: Arc<MapSettings>,
}

/// Selection query string (`?quarter=ENE-MAR&crime=RACH`)
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    /// Quarter code; defaults to the first quarter
    pub quarter: Option<String>,
    /// Crime type code; defaults to RACH
    pub crime: Option<String>,
}

impl SelectionQuery {
    fn quarter(&self) -> Result<Quarter, AppError> {
        match self.quarter.as_deref().filter(|q| !q.is_empty()) {
            None => Ok(Quarter::default()),
            Some(code) => Quarter::parse(code)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown quarter: {}", code))),
        }
    }

    fn crime(&self) -> Result<CrimeType, AppError> {
        match self.crime.as_deref().filter(|c| !c.is_empty()) {
            None => Ok(CrimeType::default()),
            Some(code) => CrimeType::parse(code)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown crime type: {}", code))),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Number of zones in the loaded layer
    pub zone_count: usize,
    /// Active matching strategy
    pub strategy: String,
}

/// Reconciliation of one quarter
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// Quarter reconciled
    pub quarter: Quarter,
    /// Quarter-wide incident totals after sentinel removal
    pub incident_totals: CrimeTotals,
    /// Zones with their totals
    pub zones: Vec<Zone>,
    /// Matching anomalies
    pub report: ReconcileReport,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Malformed selection
    BadRequest(String),
    /// Pipeline error
    EngineError(EngineError),
    /// Internal server error
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::EngineError(e) if e.is_missing_file() => (StatusCode::NOT_FOUND, e.to_string()),
            AppError::EngineError(e) => {
                error!(error = %e, "Pipeline failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<EngineError> for AppError {
    fn from(e: EngineError) -> Self {
        AppError::EngineError(e)
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::EngineError(EngineError::Render(e))
    }
}

async fn blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
}

/// GET / - Map page for the selection
async fn map_page(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Html<String>, AppError> {
    let quarter = query.quarter()?;
    let crime = query.crime()?;

    let html = blocking(move || {
        let document = state.engine.render(quarter, crime, &state.map)?;
        Ok(document.to_html(&PageContext::interactive("/"))?)
    })
    .await?;

    Ok(Html(html))
}

/// GET /api/zones - Choropleth features as GeoJSON
async fn zones_geojson(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Response, AppError> {
    let quarter = query.quarter()?;
    let crime = query.crime()?;

    let geojson = blocking(move || {
        let document = state.engine.render(quarter, crime, &state.map)?;
        Ok(document.to_geojson())
    })
    .await?;

    Ok(([(header::CONTENT_TYPE, "application/geo+json")], geojson).into_response())
}

/// GET /api/report - Zone totals and matching anomalies for a quarter
async fn quarter_report(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<ReportResponse>, AppError> {
    let quarter = query.quarter()?;

    let run = blocking(move || Ok(state.engine.run(quarter)?)).await?;

    Ok(Json(ReportResponse {
        quarter,
        incident_totals: run.incidents.totals(),
        zones: run.reconciliation.zones,
        report: run.reconciliation.report,
    }))
}

/// GET /health - Liveness check
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let zone_count = state.engine.layer().len();
    let status = if zone_count == 0 { "degraded" } else { "healthy" };

    Json(HealthCheckResponse {
        status: status.to_string(),
        zone_count,
        strategy: state.engine.strategy().name().to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/", get(map_page))
        .route("/api/zones", get(zones_geojson))
        .route("/api/report", get(quarter_report))
        .route("/health", get(health_check))
        .with_state(state)
}

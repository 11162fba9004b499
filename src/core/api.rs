//! HTTP API for DER scoring
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /der - Score turn arrays for one recording
//! - POST /der/rttm - Score RTTM/UEM text for a corpus

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::{compute_der, parse_rttm, parse_uem, score_corpus, IntervalSet};
use crate::types::{CorpusReport, DerError, Metrics, RegionMode, ScoringConfig, Turn};

/// App state
pub struct AppState {
    pub defaults: ScoringConfig,
    pub requests_scored: AtomicU64,
}

impl AppState {
    /// Request fields override the server defaults
    fn config_for(&self, regions: Option<RegionMode>, collar: Option<f64>) -> ScoringConfig {
        ScoringConfig {
            regions: regions.unwrap_or(self.defaults.regions),
            collar: collar.unwrap_or(self.defaults.collar),
        }
    }
}

/// Score turn arrays request
#[derive(Debug, Deserialize)]
pub struct TurnsRequest {
    pub reference: Vec<Turn>,
    pub hypothesis: Vec<Turn>,
    pub uem: Option<Vec<Turn>>,
    pub regions: Option<RegionMode>,
    pub collar: Option<f64>,
}

/// Score RTTM text request
#[derive(Debug, Deserialize)]
pub struct RttmRequest {
    pub reference: String,
    pub hypothesis: String,
    pub uem: Option<String>,
    pub regions: Option<RegionMode>,
    pub collar: Option<f64>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub requests_scored: u64,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn reject(err: DerError) -> ApiError {
    debug!(code = err.code(), error = %err, "rejected scoring request");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.to_string(),
            code: err.code().to_string(),
        }),
    )
}

/// Create the API router
pub fn create_router(defaults: ScoringConfig) -> Router {
    let state = Arc::new(AppState {
        defaults,
        requests_scored: AtomicU64::new(0),
    });

    Router::new()
        .route("/health", get(health))
        .route("/der", post(score_turns))
        .route("/der/rttm", post(score_rttm))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        requests_scored: state.requests_scored.load(Ordering::Relaxed),
    })
}

/// Score one recording given as turn arrays
async fn score_turns(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TurnsRequest>,
) -> Result<Json<Metrics>, ApiError> {
    let config = state.config_for(req.regions, req.collar);
    config.validate().map_err(reject)?;

    let reference = IntervalSet::build(req.reference).map_err(reject)?;
    let hypothesis = IntervalSet::build(req.hypothesis).map_err(reject)?;
    let mask = req.uem.map(IntervalSet::build).transpose().map_err(reject)?;

    let metrics = compute_der(reference, hypothesis, mask, config.regions, config.collar)
        .map_err(reject)?;
    state.requests_scored.fetch_add(1, Ordering::Relaxed);
    Ok(Json(metrics))
}

/// Score a corpus given as RTTM (and optional UEM) text
async fn score_rttm(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RttmRequest>,
) -> Result<Json<CorpusReport>, ApiError> {
    let config = state.config_for(req.regions, req.collar);

    let reference = parse_rttm(&req.reference).map_err(reject)?;
    let hypothesis = parse_rttm(&req.hypothesis).map_err(reject)?;
    let uem = req.uem.as_deref().map(parse_uem).transpose().map_err(reject)?;

    let report = score_corpus(&reference, &hypothesis, uem.as_ref(), &config).map_err(reject)?;
    state.requests_scored.fetch_add(1, Ordering::Relaxed);
    Ok(Json(report))
}

/// Run the API server
pub async fn run_server(addr: &str, defaults: ScoringConfig) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(defaults);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr,
        regions = %defaults.regions,
        collar = defaults.collar,
        "spyder scoring service listening (GET /health, POST /der, POST /der/rttm)"
    );
    axum::serve(listener, router).await?;
    Ok(())
}

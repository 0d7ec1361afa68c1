//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use super::analyze::LANGUAGE;
use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" when the classifier is ready, "degraded" otherwise
    pub status: String,
    pub service: String,
    pub model_loaded: bool,
    pub model: String,
    /// Crate version from Cargo.toml
    pub version: String,
    pub git_hash: String,
    pub language: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
}

/// GET /health
///
/// Always 200; a missing model shows up as `model_loaded: false`.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;
    let model_loaded = state.analyzer.is_ready();

    Json(HealthResponse {
        status: if model_loaded { "healthy" } else { "degraded" }.to_string(),
        service: "tsa-api".to_string(),
        model_loaded,
        model: state.model_name().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        language: LANGUAGE.to_string(),
        uptime_seconds,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

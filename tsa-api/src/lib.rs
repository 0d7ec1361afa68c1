//! tsa-api library - Turkish sentiment analysis service
//!
//! Wraps the fusion engine from tsa-common with an HTTP classifier adapter
//! and an axum router.

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tsa_common::config::DEFAULT_MODEL_NAME;

pub mod analyzer;
pub mod api;
pub mod classifier;
pub mod error;

pub use crate::analyzer::Analyzer;
pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Classifier + fusion engine
    pub analyzer: Arc<Analyzer>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            startup_time: Utc::now(),
        }
    }

    /// Model name reported to clients
    pub fn model_name(&self) -> &str {
        self.analyzer.model_name().unwrap_or(DEFAULT_MODEL_NAME)
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::service_info))
        .route("/analyze", get(api::analyze_usage).post(api::analyze_text))
        .route("/batch", post(api::analyze_batch))
        .route("/test-special", get(api::run_special_cases))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Browser clients call the API directly
        .layer(CorsLayer::permissive())
}

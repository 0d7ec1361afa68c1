//! Special-case self test endpoint

use axum::{extract::State, Json};
use tsa_common::scenarios::SelfTestReport;

use crate::AppState;

/// GET /test-special
///
/// Runs the fixed scenario set through the full pipeline (classifier
/// included) and reports accuracy. Cases fail individually if the
/// classifier is unavailable; the endpoint itself still returns 200.
pub async fn run_special_cases(State(state): State<AppState>) -> Json<SelfTestReport> {
    Json(state.analyzer.run_self_test().await)
}

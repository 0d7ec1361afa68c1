//! Batch analysis endpoint

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use tracing::info;
use tsa_common::Error;

use super::analyze::AnalysisResponse;
use super::body::json_object;
use crate::analyzer::BatchEntry;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// One slot of the batch response
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Analysis(AnalysisResponse),
    Error { error: String },
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub count: usize,
    pub results: Vec<BatchItem>,
}

/// POST /batch
///
/// Body: `{"texts": ["...", ...]}` with at most 10 entries. Invalid entries
/// get an error placeholder at their position.
pub async fn analyze_batch(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<BatchResponse>> {
    let fields = json_object(&body)?;
    let texts = fields
        .get("texts")
        .ok_or_else(|| ApiError::BadRequest("'texts' list is required".to_string()))?;
    let items = texts
        .as_array()
        .ok_or_else(|| Error::InvalidBatch("'texts' must be a list".to_string()))?;

    info!(count = items.len(), "Batch request received");

    let model = state.model_name();
    let results: Vec<BatchItem> = state
        .analyzer
        .analyze_batch(items)
        .await?
        .into_iter()
        .map(|entry| match entry {
            BatchEntry::Analysis(result) => BatchItem::Analysis(AnalysisResponse::new(result, model)),
            BatchEntry::Error { error } => BatchItem::Error { error },
        })
        .collect();

    Ok(Json(BatchResponse {
        count: results.len(),
        results,
    }))
}

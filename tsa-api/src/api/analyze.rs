//! Single-text analysis endpoint

use axum::{
    extract::{Request, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use tsa_common::{AnalysisResult, DecisionReason, Sentiment};

use super::body::{pick_text, read_fields};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Language tag reported with every analysis
pub const LANGUAGE: &str = "turkish";

/// Analysis as returned to HTTP clients
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub text: String,
    pub sentiment: Sentiment,
    pub turkish_label: String,
    pub score: f64,
    pub original_score: f64,
    /// e.g. `%85.0`
    pub confidence: String,
    pub emoji: String,
    pub color: String,
    pub model: String,
    pub language: String,
    pub analysis: AnalysisDetails,
}

/// Why the engine decided what it did
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisDetails {
    pub decision_reason: DecisionReason,
    pub has_strong_emotion: bool,
    pub has_special_phrase: bool,
    pub word_count: usize,
}

impl AnalysisResponse {
    pub fn new(result: AnalysisResult, model: &str) -> Self {
        let confidence = result.confidence_label();
        let sentiment = result.sentiment;

        Self {
            text: result.text,
            sentiment,
            turkish_label: sentiment.turkish_label().to_string(),
            score: result.score,
            original_score: result.original_score,
            confidence,
            emoji: sentiment.emoji().to_string(),
            color: sentiment.color().to_string(),
            model: model.to_string(),
            language: LANGUAGE.to_string(),
            analysis: AnalysisDetails {
                decision_reason: result.reason,
                has_strong_emotion: result.has_strong_emotion,
                has_special_phrase: result.has_special_phrase,
                word_count: result.word_count,
            },
        }
    }
}

/// POST /analyze
///
/// Body: `{"text": "..."}` (or `input` / `message`), JSON or form-encoded.
pub async fn analyze_text(
    State(state): State<AppState>,
    request: Request,
) -> ApiResult<Json<AnalysisResponse>> {
    let fields = read_fields(request).await?;
    let text = pick_text(&fields)
        .ok_or_else(|| ApiError::BadRequest("Text to analyze is required".to_string()))?;

    info!(text = %text, "Analysis request received");

    let result = state.analyzer.analyze(text).await?;
    Ok(Json(AnalysisResponse::new(result, state.model_name())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsa_common::{ClassifierVerdict, FusionEngine, ModelLabel};

    #[test]
    fn test_response_presentation_fields() {
        let result = FusionEngine::default()
            .analyze("kötü değil", ClassifierVerdict::new(ModelLabel::Negative, 0.91234))
            .unwrap();
        let response = AnalysisResponse::new(result, "test-model");

        assert_eq!(response.turkish_label, "pozitif");
        assert_eq!(response.emoji, "😊");
        assert_eq!(response.color, "#10B981");
        assert_eq!(response.confidence, "%75.0");
        assert_eq!(response.original_score, 0.9123);
        assert_eq!(response.model, "test-model");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["sentiment"], "positive");
        assert_eq!(json["analysis"]["decision_reason"], "negated_negative_phrase");
        assert_eq!(json["analysis"]["has_special_phrase"], true);
        assert_eq!(json["analysis"]["word_count"], 2);
    }
}

//! HTTP inference client
//!
//! Talks to a Hugging Face–compatible text-classification endpoint:
//! `POST {"inputs": "..."}` answered by `[{label, score}, ...]` or the
//! nested `[[{label, score}, ...]]` form. The highest-scoring label wins.

use super::{Classifier, ClassifierError};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info};
use tsa_common::ClassifierVerdict;

const USER_AGENT: &str = concat!("tsa-api/", env!("CARGO_PKG_VERSION"));

/// Probe sentence sent by [`HttpClassifier::warm_up`]
const WARM_UP_TEXT: &str = "Bugün harika bir gün!";

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Single(LabelScore),
    Error { error: String },
}

/// Remote classifier client
pub struct HttpClassifier {
    http_client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
    model_name: String,
    ready: AtomicBool,
}

impl HttpClassifier {
    pub fn new(
        endpoint: impl Into<String>,
        api_token: Option<String>,
        model_name: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifierError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
            api_token,
            model_name: model_name.into(),
            ready: AtomicBool::new(false),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a probe request and mark the classifier ready on success
    pub async fn warm_up(&self) -> Result<(), ClassifierError> {
        let verdict = self.request(WARM_UP_TEXT).await?;
        self.ready.store(true, Ordering::Release);
        info!(
            model = %self.model_name,
            label = ?verdict.label,
            score = verdict.score,
            "Classifier ready"
        );
        Ok(())
    }

    async fn request(&self, text: &str) -> Result<ClassifierVerdict, ClassifierError> {
        let mut request = self
            .http_client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<InferenceResponse>(&body) {
                Ok(InferenceResponse::Error { error }) => error,
                _ => body,
            };
            return Err(ClassifierError::Api(status.as_u16(), message));
        }

        let verdict = parse_response(&body)?;
        debug!(label = ?verdict.label, score = verdict.score, "Model verdict");
        Ok(verdict)
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    async fn classify(&self, text: &str) -> Result<ClassifierVerdict, ClassifierError> {
        if !self.is_ready() {
            return Err(ClassifierError::NotReady);
        }
        self.request(text).await
    }
}

/// Pick the top label out of an inference response body
fn parse_response(body: &str) -> Result<ClassifierVerdict, ClassifierError> {
    let response: InferenceResponse = serde_json::from_str(body)
        .map_err(|e| ClassifierError::Parse(format!("{}: {}", e, body)))?;

    let candidates = match response {
        InferenceResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        InferenceResponse::Flat(candidates) => candidates,
        InferenceResponse::Single(candidate) => vec![candidate],
        InferenceResponse::Error { error } => return Err(ClassifierError::Api(200, error)),
    };

    if let Some(bad) = candidates.iter().find(|c| !c.score.is_finite()) {
        return Err(ClassifierError::Parse(format!(
            "Non-finite score for label '{}'",
            bad.label
        )));
    }

    candidates
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|top| ClassifierVerdict::from_raw(&top.label, top.score))
        .ok_or_else(|| ClassifierError::Parse("Empty label list".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsa_common::ModelLabel;

    #[test]
    fn test_parse_flat_response_picks_top_label() {
        let verdict = parse_response(
            r#"[{"label":"negative","score":0.12},{"label":"positive","score":0.88}]"#,
        )
        .unwrap();
        assert_eq!(verdict.label, ModelLabel::Positive);
        assert_eq!(verdict.score, 0.88);
    }

    #[test]
    fn test_parse_nested_response() {
        let verdict = parse_response(
            r#"[[{"label":"positive","score":0.03},{"label":"negative","score":0.97}]]"#,
        )
        .unwrap();
        assert_eq!(verdict.label, ModelLabel::Negative);
        assert_eq!(verdict.score, 0.97);
    }

    #[test]
    fn test_parse_single_object() {
        let verdict = parse_response(r#"{"label":"LABEL_0","score":0.6}"#).unwrap();
        assert_eq!(verdict.label, ModelLabel::Unknown);
    }

    #[test]
    fn test_parse_error_body() {
        let result = parse_response(r#"{"error":"Model is currently loading"}"#);
        assert!(matches!(result, Err(ClassifierError::Api(_, msg)) if msg.contains("loading")));
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(matches!(parse_response("[]"), Err(ClassifierError::Parse(_))));
        assert!(matches!(parse_response("[[]]"), Err(ClassifierError::Parse(_))));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse_response("<html>"), Err(ClassifierError::Parse(_))));
    }

    #[test]
    fn test_not_ready_before_warm_up() {
        let classifier = HttpClassifier::new(
            "http://127.0.0.1:9/predict",
            None,
            "test-model",
            Duration::from_secs(1),
        )
        .unwrap();
        assert!(!classifier.is_ready());
        assert_eq!(classifier.name(), "test-model");
    }
}

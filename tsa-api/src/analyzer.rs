//! Analysis pipeline
//!
//! normalize → check classifier → classify → fuse. Blank input is rejected
//! before the classifier is touched.

use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tsa_common::scenarios::{ScenarioOutcome, SelfTestReport, SPECIAL_CASES};
use tsa_common::{AnalysisResult, Error, FusionEngine, Result};

use crate::classifier::Classifier;

/// Maximum number of texts accepted by one batch request
pub const MAX_BATCH_SIZE: usize = 10;

/// Error message for a batch slot that could not be analyzed as text
pub const INVALID_TEXT_MESSAGE: &str = "Invalid text";

/// One slot of a batch response
#[derive(Debug, Clone)]
pub enum BatchEntry {
    Analysis(AnalysisResult),
    Error { error: String },
}

impl BatchEntry {
    fn error(message: impl Into<String>) -> Self {
        BatchEntry::Error {
            error: message.into(),
        }
    }
}

/// Classifier + fusion engine
pub struct Analyzer {
    classifier: Option<Arc<dyn Classifier>>,
    engine: FusionEngine,
}

impl Analyzer {
    /// `classifier` is `None` when no model is configured
    pub fn new(classifier: Option<Arc<dyn Classifier>>, engine: FusionEngine) -> Self {
        Self { classifier, engine }
    }

    /// Model name, if a classifier is configured
    pub fn model_name(&self) -> Option<&str> {
        self.classifier.as_deref().map(|c| c.name())
    }

    /// True when a classifier is configured and ready
    pub fn is_ready(&self) -> bool {
        self.classifier.as_deref().is_some_and(|c| c.is_ready())
    }

    /// Analyze one text
    pub async fn analyze(&self, raw_text: &str) -> Result<AnalysisResult> {
        let text = self.engine.normalize(raw_text)?;

        let classifier = self
            .classifier
            .as_deref()
            .filter(|c| c.is_ready())
            .ok_or(Error::ClassifierUnavailable)?;

        let verdict = classifier.classify(&text).await.map_err(|e| {
            warn!(error = %e, "Classifier call failed");
            Error::Classifier(e.to_string())
        })?;
        debug!(text = %text, label = ?verdict.label, score = verdict.score, "Model analysis");

        let result = self.engine.fuse(text, verdict);
        info!(
            sentiment = %result.sentiment,
            confidence = %result.confidence_label(),
            reason = %result.reason,
            "Final decision"
        );
        Ok(result)
    }

    /// Analyze up to [`MAX_BATCH_SIZE`] items concurrently
    ///
    /// Non-string or blank items become an error entry in place; a failed
    /// item never aborts its siblings. Output order matches input order.
    pub async fn analyze_batch(&self, items: &[Value]) -> Result<Vec<BatchEntry>> {
        if items.len() > MAX_BATCH_SIZE {
            return Err(Error::InvalidBatch(format!(
                "At most {} texts can be sent",
                MAX_BATCH_SIZE
            )));
        }

        let futures = items.iter().map(|item| async move {
            match item.as_str().filter(|text| !text.trim().is_empty()) {
                Some(text) => match self.analyze(text).await {
                    Ok(result) => BatchEntry::Analysis(result),
                    Err(e) => BatchEntry::error(e.to_string()),
                },
                None => BatchEntry::error(INVALID_TEXT_MESSAGE),
            }
        });

        Ok(join_all(futures).await)
    }

    /// Run the built-in special cases end to end
    pub async fn run_self_test(&self) -> SelfTestReport {
        let futures = SPECIAL_CASES.iter().map(|scenario| async move {
            let analysis = self.analyze(scenario.text).await;
            ScenarioOutcome::new(scenario, &analysis)
        });
        let report = SelfTestReport::from_outcomes(join_all(futures).await);
        info!(
            correct = report.correct_predictions,
            total = report.total_tests,
            accuracy = %report.accuracy,
            "Special case test finished"
        );
        report
    }
}

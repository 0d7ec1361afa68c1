//! Built-in special-case scenarios
//!
//! A fixed set of phrases the classifier alone tends to get wrong. The HTTP
//! layer runs them end-to-end and reports accuracy.

use crate::sentiment::{format_percent, AnalysisResult, DecisionReason, Sentiment};
use serde::Serialize;

/// One expected outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub text: &'static str,
    pub expected: Sentiment,
    pub description: &'static str,
}

/// Fixed scenario set
pub const SPECIAL_CASES: &[Scenario] = &[
    Scenario {
        text: "fena değil",
        expected: Sentiment::Positive,
        description: "Negative word inside a positive expression",
    },
    Scenario {
        text: "normalim",
        expected: Sentiment::Neutral,
        description: "Plain neutral expression",
    },
    Scenario {
        text: "çok mutluyum",
        expected: Sentiment::Positive,
        description: "Clear positive expression",
    },
    Scenario {
        text: "üzgünüm",
        expected: Sentiment::Negative,
        description: "Clear negative expression",
    },
    Scenario {
        text: "idare eder",
        expected: Sentiment::Neutral,
        description: "Neutral idiom",
    },
    Scenario {
        text: "kötü değil",
        expected: Sentiment::Positive,
        description: "Negated negative adjective",
    },
];

/// Per-scenario outcome
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub text: String,
    pub expected: Sentiment,
    /// `None` when the analysis itself failed
    pub actual: Option<Sentiment>,
    pub score: Option<f64>,
    pub confidence: Option<String>,
    pub reason: Option<DecisionReason>,
    pub description: String,
    pub status: String,
    pub is_correct: bool,
}

impl ScenarioOutcome {
    /// Build the outcome for `scenario` from its analysis
    pub fn new<E>(scenario: &Scenario, analysis: &Result<AnalysisResult, E>) -> Self {
        let result = analysis.as_ref().ok();
        let actual = result.map(|r| r.sentiment);
        let is_correct = actual == Some(scenario.expected);

        Self {
            text: scenario.text.to_string(),
            expected: scenario.expected,
            actual,
            score: result.map(|r| r.score),
            confidence: result.map(AnalysisResult::confidence_label),
            reason: result.map(|r| r.reason),
            description: scenario.description.to_string(),
            status: if is_correct { "✅" } else { "❌" }.to_string(),
            is_correct,
        }
    }
}

/// Accuracy report over the scenario set
#[derive(Debug, Clone, Serialize)]
pub struct SelfTestReport {
    pub test_type: String,
    pub total_tests: usize,
    pub correct_predictions: usize,
    /// e.g. `%83.3`
    pub accuracy: String,
    pub results: Vec<ScenarioOutcome>,
}

impl SelfTestReport {
    pub fn from_outcomes(results: Vec<ScenarioOutcome>) -> Self {
        let total_tests = results.len();
        let correct_predictions = results.iter().filter(|r| r.is_correct).count();
        let accuracy = if total_tests == 0 {
            0.0
        } else {
            correct_predictions as f64 / total_tests as f64 * 100.0
        };

        Self {
            test_type: "special_cases_accuracy".to_string(),
            total_tests,
            correct_predictions,
            accuracy: format_percent(accuracy),
            results,
        }
    }
}

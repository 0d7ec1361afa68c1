//! Sentiment domain types
//!
//! Shared by the fusion engine and the HTTP layer. The classifier label is
//! turned into a [`ModelLabel`] once, at the adapter boundary, so nothing
//! downstream parses label strings.

use serde::{Deserialize, Serialize};

/// Final sentiment emitted by the fusion engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Turkish display label
    pub fn turkish_label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "pozitif",
            Sentiment::Negative => "negatif",
            Sentiment::Neutral => "nötr",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Sentiment::Positive => "😊",
            Sentiment::Negative => "😔",
            Sentiment::Neutral => "😐",
        }
    }

    /// Hex color used by clients to tint the result
    pub fn color(&self) -> &'static str {
        match self {
            Sentiment::Positive => "#10B981",
            Sentiment::Negative => "#EF4444",
            Sentiment::Neutral => "#6B7280",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary classifier label, decided once from the raw label string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelLabel {
    Positive,
    Negative,
    /// Label matched neither polarity (e.g. `LABEL_2`)
    Unknown,
}

impl ModelLabel {
    /// Parse a raw classifier label
    ///
    /// Case-insensitive substring match on the English and Turkish
    /// spellings. Positive is checked first.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("positive") || lower.contains("pozitif") {
            ModelLabel::Positive
        } else if lower.contains("negative") || lower.contains("negatif") {
            ModelLabel::Negative
        } else {
            ModelLabel::Unknown
        }
    }
}

/// Raw classifier output before rule-based correction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierVerdict {
    pub label: ModelLabel,
    /// Confidence in `label`, conventionally 0.0-1.0 (not validated)
    pub score: f64,
}

impl ClassifierVerdict {
    pub fn new(label: ModelLabel, score: f64) -> Self {
        Self { label, score }
    }

    /// Build a verdict straight from the classifier's label string
    pub fn from_raw(label: &str, score: f64) -> Self {
        Self::new(ModelLabel::parse(label), score)
    }
}

/// Which rule produced the final sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    NegatedNegativePhrase,
    StrongPositivePhrase,
    StrongNegativePhrase,
    NeutralPhrase,
    ShortTextLowConfidence,
    ModelPositive,
    ModelNegative,
    FallbackNeutral,
}

impl DecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionReason::NegatedNegativePhrase => "negated_negative_phrase",
            DecisionReason::StrongPositivePhrase => "strong_positive_phrase",
            DecisionReason::StrongNegativePhrase => "strong_negative_phrase",
            DecisionReason::NeutralPhrase => "neutral_phrase",
            DecisionReason::ShortTextLowConfidence => "short_text_low_confidence",
            DecisionReason::ModelPositive => "model_positive",
            DecisionReason::ModelNegative => "model_negative",
            DecisionReason::FallbackNeutral => "fallback_neutral",
        }
    }
}

impl std::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fused analysis of one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Normalized input text
    pub text: String,
    pub sentiment: Sentiment,
    /// Fused confidence, clamped to 0.10-0.99 and rounded to 4 decimals
    pub score: f64,
    /// Classifier score rounded to 4 decimals
    pub original_score: f64,
    /// Fused confidence as a percentage string, from the unrounded score
    pub confidence: String,
    pub reason: DecisionReason,
    pub word_count: usize,
    /// A strong positive or strong negative phrase matched
    pub has_strong_emotion: bool,
    /// A negated-negative phrase matched
    pub has_special_phrase: bool,
}

impl AnalysisResult {
    /// Confidence as a percentage string, e.g. `%85.0`
    pub fn confidence_label(&self) -> String {
        self.confidence.clone()
    }
}

/// Round to 4 decimal places
///
/// Rounds the exact binary value, so 0.33335 (stored just below the tie)
/// becomes 0.3333.
pub fn round4(value: f64) -> f64 {
    format!("{:.4}", value).parse().unwrap_or(value)
}

/// Format a percentage with one decimal and a leading `%` (Turkish style)
pub fn format_percent(percent: f64) -> String {
    format!("%{:.1}", percent)
}

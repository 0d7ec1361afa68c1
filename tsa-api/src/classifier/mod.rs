//! Sentiment classifier collaborator
//!
//! The statistical model is an external capability: given a text it returns
//! a label and a confidence. Implementations convert their raw label into a
//! [`ModelLabel`](tsa_common::ModelLabel) here, so the fusion engine never
//! sees label strings.

pub mod http;

pub use http::HttpClassifier;

use async_trait::async_trait;
use thiserror::Error;
use tsa_common::ClassifierVerdict;

/// Classifier errors
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// Called before the model finished loading
    #[error("Classifier is not ready")]
    NotReady,
}

/// Text classifier capability
///
/// Constructed once at startup and shared by reference between handlers.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Model name reported in responses
    fn name(&self) -> &str;

    /// True once the model can serve requests
    fn is_ready(&self) -> bool;

    /// Classify normalized text
    async fn classify(&self, text: &str) -> Result<ClassifierVerdict, ClassifierError>;
}

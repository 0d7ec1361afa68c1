//! Common error types for TSA

use thiserror::Error;

/// Common result type for TSA operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across TSA crates
#[derive(Error, Debug)]
pub enum Error {
    /// Text was blank after trimming
    #[error("Text to analyze is empty")]
    EmptyInput,

    /// No classifier is loaded, or it has not become ready yet
    #[error("Sentiment classifier is not available")]
    ClassifierUnavailable,

    /// Batch request is not a list or exceeds the size cap
    #[error("Invalid batch: {0}")]
    InvalidBatch(String),

    /// Classifier call failed after it was reported ready
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error (config or lexicon file)
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// True for errors caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::EmptyInput | Error::InvalidBatch(_))
    }
}

//! # TSA Common Library
//!
//! Shared code for the Turkish sentiment analysis service:
//! - Decision-fusion engine (classifier verdict + lexical rules)
//! - Phrase lexicon
//! - Sentiment domain types
//! - Built-in special-case scenarios
//! - Configuration loading

pub mod config;
pub mod error;
pub mod fusion;
pub mod lexicon;
pub mod scenarios;
pub mod sentiment;

pub use error::{Error, Result};
pub use fusion::FusionEngine;
pub use lexicon::Lexicon;
pub use sentiment::{AnalysisResult, ClassifierVerdict, DecisionReason, ModelLabel, Sentiment};

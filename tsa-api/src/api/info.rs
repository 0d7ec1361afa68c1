//! Static description documents
//!
//! Served without touching the classifier.

use axum::Json;
use serde::Serialize;

use crate::analyzer::MAX_BATCH_SIZE;

#[derive(Debug, Serialize)]
pub struct EndpointDoc {
    pub route: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub special_features: Vec<&'static str>,
    pub endpoints: Vec<EndpointDoc>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeUsage {
    pub message: &'static str,
    pub version: &'static str,
    pub usage: &'static str,
    pub accepted_fields: Vec<&'static str>,
    pub max_batch_size: usize,
    pub special_features: Vec<&'static str>,
}

fn special_features() -> Vec<&'static str> {
    vec![
        "'fena değil' → positive",
        "'normalim' → neutral",
        "Clear emotion phrases take priority over the model",
    ]
}

/// GET /
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Turkish Sentiment Analysis API",
        version: env!("CARGO_PKG_VERSION"),
        description: "Classifier output corrected by Turkish phrase rules",
        special_features: special_features(),
        endpoints: vec![
            EndpointDoc { route: "POST /analyze", description: "Analyze one text" },
            EndpointDoc { route: "GET /analyze", description: "Usage of the analyze endpoint" },
            EndpointDoc { route: "POST /batch", description: "Analyze up to 10 texts" },
            EndpointDoc { route: "GET /health", description: "Service status" },
            EndpointDoc { route: "GET /test-special", description: "Run the built-in special cases" },
            EndpointDoc { route: "GET /", description: "This document" },
        ],
    })
}

/// GET /analyze
pub async fn analyze_usage() -> Json<AnalyzeUsage> {
    Json(AnalyzeUsage {
        message: "Turkish Sentiment Analysis API",
        version: env!("CARGO_PKG_VERSION"),
        usage: "POST {\"text\": \"text to analyze\"}",
        accepted_fields: super::body::TEXT_FIELDS.to_vec(),
        max_batch_size: MAX_BATCH_SIZE,
        special_features: special_features(),
    })
}

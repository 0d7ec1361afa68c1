//! Error types for tsa-api
//!
//! Every error leaves the service as `{"error": "<message>"}` with a 400
//! for caller mistakes and a 500 for everything else.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// tsa-common error
    #[error(transparent)]
    Common(#[from] tsa_common::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Common(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!("Request failed: {}", message);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tsa_common::Error;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from(Error::EmptyInput).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(Error::InvalidBatch("too many".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(Error::ClassifierUnavailable).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(Error::Classifier("timeout".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::BadRequest("missing text".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_message_is_transparent_for_common_errors() {
        assert_eq!(
            ApiError::from(Error::ClassifierUnavailable).to_string(),
            "Sentiment classifier is not available"
        );
    }
}

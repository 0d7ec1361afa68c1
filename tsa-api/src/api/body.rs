//! Request body helpers
//!
//! `/analyze` accepts JSON or an HTML form (urlencoded or multipart);
//! `/batch` is JSON only.

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};

/// Keys checked for the text to analyze, in order
pub const TEXT_FIELDS: [&str; 3] = ["text", "input", "message"];

/// Parse a JSON object body
pub fn json_object(body: &[u8]) -> ApiResult<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::BadRequest("JSON body is required".to_string()));
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::BadRequest("JSON body must be an object".to_string())),
        Err(e) => Err(ApiError::BadRequest(format!("Malformed JSON body: {}", e))),
    }
}

/// Read the request body as key/value fields
///
/// Form bodies become string fields; anything else is parsed as a JSON
/// object. Multipart file parts are skipped, and a repeated field keeps its
/// first value.
pub async fn read_fields(request: Request) -> ApiResult<Map<String, Value>> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        return read_multipart(request).await;
    }

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(fields) = Form::<HashMap<String, String>>::from_request(request, &())
            .await
            .map_err(|e| ApiError::BadRequest(format!("Malformed form body: {}", e)))?;
        return Ok(fields
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect());
    }

    let body = Bytes::from_request(request, &())
        .await
        .map_err(|e| ApiError::BadRequest(format!("Unreadable body: {}", e)))?;
    json_object(&body)
}

async fn read_multipart(request: Request) -> ApiResult<Map<String, Value>> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed form body: {}", e)))?;

    let mut fields = Map::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed form body: {}", e)))?
    {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Malformed form field: {}", e)))?;
        fields.entry(name).or_insert(Value::String(value));
    }
    Ok(fields)
}

/// First non-empty string among [`TEXT_FIELDS`]
pub fn pick_text(fields: &Map<String, Value>) -> Option<&str> {
    TEXT_FIELDS
        .iter()
        .filter_map(|key| fields.get(*key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_pick_text_priority() {
        let fields = object(json!({"message": "c", "input": "b", "text": "a"}));
        assert_eq!(pick_text(&fields), Some("a"));

        let fields = object(json!({"message": "c", "input": "b", "text": ""}));
        assert_eq!(pick_text(&fields), Some("b"));

        let fields = object(json!({"message": "c", "text": 5}));
        assert_eq!(pick_text(&fields), Some("c"));

        let fields = object(json!({"other": "x"}));
        assert_eq!(pick_text(&fields), None);
    }

    #[test]
    fn test_pick_text_keeps_whitespace_only() {
        // Blank text is rejected later by the engine, with a clearer error
        let fields = object(json!({"text": "   "}));
        assert_eq!(pick_text(&fields), Some("   "));
    }

    #[test]
    fn test_json_object_rejections() {
        assert!(json_object(b"").is_err());
        assert!(json_object(b"  \n").is_err());
        assert!(json_object(b"[1,2]").is_err());
        assert!(json_object(b"{not json").is_err());
        assert!(json_object(br#"{"text":"merhaba"}"#).is_ok());
    }
}

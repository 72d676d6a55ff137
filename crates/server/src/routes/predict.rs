use std::sync::Arc;

use axum::{body::Bytes, Extension, Json};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::service::PredictionService;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: &'static str,
}

/// POST /predict
/// Body `{"fen": "<FEN>"}`, parsed as JSON whatever the content type.
pub async fn predict(
    Extension(service): Extension<Arc<PredictionService>>,
    body: Bytes,
) -> Result<Json<PredictResponse>, AppError> {
    let fen = fen_field(&body);
    let outcome = service.predict(fen.as_deref())?;
    Ok(Json(PredictResponse {
        prediction: outcome.sentence(),
    }))
}

/// Pull the `fen` field out of a request body.
///
/// Unparseable bodies, non-objects and falsy values (`null`, `""`, `0`,
/// `false`, empty arrays/objects) count as missing. Other non-string values
/// are passed through as their JSON text so they fail FEN parsing.
fn fen_field(body: &[u8]) -> Option<String> {
    let payload: JsonValue = serde_json::from_slice(body).ok()?;
    match payload.as_object()?.get("fen")? {
        JsonValue::String(s) => Some(s.clone()),
        value if is_falsy(value) => None,
        value => Some(value.to_string()),
    }
}

fn is_falsy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Bool(b) => !b,
        JsonValue::Number(n) => n.as_f64() == Some(0.0),
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(a) => a.is_empty(),
        JsonValue::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_field_string() {
        let body = br#"{"fen": "8/8/8/8/8/8/8/8 w - - 0 1"}"#;
        assert_eq!(fen_field(body).as_deref(), Some("8/8/8/8/8/8/8/8 w - - 0 1"));
    }

    #[test]
    fn test_fen_field_missing() {
        for body in [
            &b""[..],
            b"not json",
            b"[]",
            b"\"fen\"",
            b"{}",
            br#"{"fen": null}"#,
            br#"{"fen": ""}"#,
            br#"{"fen": false}"#,
            br#"{"fen": 0}"#,
            br#"{"fen": []}"#,
            br#"{"board": "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"}"#,
        ] {
            assert_eq!(fen_field(body), None, "{}", String::from_utf8_lossy(body));
        }
    }

    #[test]
    fn test_fen_field_non_string_passed_through() {
        assert_eq!(fen_field(br#"{"fen": 42}"#).as_deref(), Some("42"));
        assert_eq!(fen_field(br#"{"fen": true}"#).as_deref(), Some("true"));
    }
}

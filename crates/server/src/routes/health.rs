use std::sync::Arc;

use axum::{Extension, Json};
use serde_json::{json, Value as JsonValue};

use crate::service::PredictionService;

/// GET /health
pub async fn health_check(
    Extension(service): Extension<Arc<PredictionService>>,
) -> Json<JsonValue> {
    Json(json!({
        "status": "ok",
        "model_loaded": service.model_loaded(),
    }))
}

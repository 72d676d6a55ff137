use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Request-level failures of the prediction endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("No FEN string provided.")]
    MissingInput,

    #[error("Invalid FEN string.")]
    InvalidPosition,

    #[error("Model not loaded. Please train the model and save it as chess_model.pkl.")]
    ModelUnavailable,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingInput | AppError::InvalidPosition => StatusCode::BAD_REQUEST,
            AppError::ModelUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Prediction failed: {self}");
        } else {
            tracing::debug!("Rejected prediction request: {self}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::MissingInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidPosition.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::ModelUnavailable.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_status() {
        let resp = AppError::ModelUnavailable.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let resp = AppError::InvalidPosition.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod service;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::service::PredictionService;

/// Build the application router around a shared prediction service.
pub fn app(service: Arc<PredictionService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index::index))
        .route("/health", get(routes::health::health_check))
        .route("/predict", post(routes::predict::predict))
        .layer(Extension(service))
        .layer(cors)
}

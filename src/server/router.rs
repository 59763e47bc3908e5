//! Router builder utilities for proxy routes

use crate::server::handlers::{AppState, proxy_request};
use axum::{Json, Router, routing::{any, get}};
use serde_json::{Value, json};

/// Build the proxy routes
///
/// - ANY / - Catalog proxy
/// - ANY /swapi - Same endpoint under the function's name
pub fn build_proxy_routes(state: AppState) -> Router {
    Router::new()
        .route("/", any(proxy_request))
        .route("/swapi", any(proxy_request))
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "swapi-proxy"
    }))
}

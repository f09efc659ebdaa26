//! API route definitions

use crate::{handlers, state::AppState};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Dashboard page routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/api/calls", get(handlers::calls::list_calls))
        .route("/api/calls/:id", get(handlers::calls::get_call))
        .route("/api/messages", get(handlers::messages::list_messages))
        .route("/api/billing", get(handlers::billing::get_billing))
        .route("/api/templates", get(handlers::templates::list_templates))
}

/// Build health check routes
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Every route plus the JSON 404 fallback
pub fn build_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health_routes())
        .merge(api_routes())
        .fallback(not_found_handler)
}

/// Handle 404 Not Found errors
async fn not_found_handler() -> (axum::http::StatusCode, axum::Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({
            "error": "Not Found",
            "code": "ROUTE_NOT_FOUND",
            "message": "The requested endpoint does not exist"
        })),
    )
}

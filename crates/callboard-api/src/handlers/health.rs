//! Health check endpoint for monitoring

use crate::state::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Records loaded per set
    pub records: RecordCounts,
}

/// Size of each loaded record set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCounts {
    /// Calls
    pub calls: usize,
    /// Messages
    pub messages: usize,
    /// Invoices
    pub invoices: usize,
    /// Templates
    pub templates: usize,
}

/// Basic health check
///
/// The dataset is immutable after startup, so a running server is always
/// healthy.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dataset = &state.dataset;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        records: RecordCounts {
            calls: dataset.calls.len(),
            messages: dataset.messages.len(),
            invoices: dataset.invoices.len(),
            templates: dataset.templates.len(),
        },
    })
}

//! JSON error responses shared by all handlers

use axum::{http::StatusCode, response::Json};
use callboard_core::Error;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use validator::Validate;

/// Error response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional details
    pub details: Option<serde_json::Value>,
}

/// Rejection returned by every handler
pub type ApiError = (StatusCode, Json<ErrorResponse>);

impl ErrorResponse {
    /// Build a response without details
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }
}

/// Validate query parameters, rejecting with `INVALID_PARAMETERS`
///
/// # Errors
///
/// Returns a 400 response carrying the validation errors.
pub fn validate_query<Q: Validate>(query: &Q) -> Result<(), ApiError> {
    query.validate().map_err(|validation_errors| {
        warn!("Invalid query parameters: {:?}", validation_errors);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid query parameters".to_string(),
                code: "INVALID_PARAMETERS".to_string(),
                details: Some(serde_json::json!(validation_errors)),
            }),
        )
    })
}

/// Map a core error onto an HTTP response
pub fn core_error(err: &Error) -> ApiError {
    match err {
        Error::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                format!("{resource} not found"),
                "NOT_FOUND",
            )),
        ),
        Error::Validation { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message.clone(),
                code: "VALIDATION_ERROR".to_string(),
                details: Some(serde_json::json!({ "field": field })),
            }),
        ),
        other => {
            error!("Request failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "Internal server error",
                    "INTERNAL_ERROR",
                )),
            )
        }
    }
}

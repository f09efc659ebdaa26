//! JSON API server for the callboard dashboard

#![forbid(unsafe_code)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod routes;
pub mod state;

pub use state::AppState;

use axum::Router;
use callboard_core::{Config, Dataset};
use std::sync::Arc;

/// Build the API router with all routes and middleware
pub fn build_router(config: Config, dataset: Dataset) -> Router {
    let state = Arc::new(AppState::new(config, dataset));

    routes::build_router()
        .layer(axum::middleware::from_fn(
            middleware::request_logging_middleware,
        ))
        .with_state(state)
}

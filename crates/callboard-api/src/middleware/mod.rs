//! Middleware for request processing

pub mod logging;

pub use logging::{REQUEST_ID_HEADER, request_logging_middleware};

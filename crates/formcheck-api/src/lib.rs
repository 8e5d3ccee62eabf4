//! Axum HTTP API for FormCheck.
//!
//! This crate provides:
//! - Form analysis over client-extracted pose landmarks
//! - Supported exercise listing and health probes
//! - Request ids, CORS and request logging middleware
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;

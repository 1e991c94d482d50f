//! Axum HTTP API server.
//!
//! This crate provides:
//! - Script synthesis and video generation endpoints
//! - Supabase JWT verification and per-user quota enforcement
//! - Project and usage persistence (optional)
//! - Rate limiting and Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod script;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;

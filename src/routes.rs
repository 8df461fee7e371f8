//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /_health`   - Health check: link store, access log (public)
//! - `GET /`          - Home redirect when `HOME_URL` is set, otherwise 404
//! - `GET /{*path}`   - Slug redirect, or QR image with `?showQR=true`
//!
//! The health route starts with `_`, which the default slug pattern never
//! matches, so a link stored under `health` stays reachable as `/health`.
//!
//! Paths are passed to the resolver untouched. No path normalization layer
//! is installed: the resolver strips exactly one leading and one trailing
//! slash itself.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging

use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Path of the health check endpoint.
pub const HEALTH_PATH: &str = "/_health";

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health_handler))
        .route("/", get(redirect_handler))
        .route("/{*path}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}

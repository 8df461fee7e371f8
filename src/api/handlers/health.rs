//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /_health`
///
/// # Response Codes
///
/// - **200 OK**: No component reports an error
/// - **503 Service Unavailable**: One or more components degraded
///
/// A missing link store is reported as `disabled`, not as an error: the
/// service still answers every path, just never with a redirect.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "Link store reachable" },
///     "access_log": { "status": "ok", "message": "Accepting records (1024 free slots)" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;
    let access_log_check = check_access_log(&state);

    let healthy = !store_check.is_error() && !access_log_check.is_error();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            access_log: access_log_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_store(state: &AppState) -> CheckStatus {
    let Some(store) = state.resolver.store() else {
        return CheckStatus::disabled("No link store configured");
    };

    if store.health_check().await {
        CheckStatus::ok("Link store reachable")
    } else {
        CheckStatus::error("Link store unreachable")
    }
}

fn check_access_log(state: &AppState) -> CheckStatus {
    if !state.access_log.health_check() {
        return CheckStatus::error("Access log queue is closed");
    }

    match state.access_log.free_slots() {
        Some(0) => CheckStatus::ok("Accepting records (queue full, records dropped)"),
        Some(free) => CheckStatus::ok(format!("Accepting records ({free} free slots)")),
        None => CheckStatus::ok("Accepting records"),
    }
}
